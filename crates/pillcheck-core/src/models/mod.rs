//! Domain models for the pillcheck system.

mod dosage;
mod drug;
mod entity;
mod interaction;

pub use dosage::*;
pub use drug::*;
pub use entity::*;
pub use interaction::*;
