//! PillCheck Core Library
//!
//! Identifies medications in noisy OCR'd packaging text and checks the
//! identified set for known dangerous interactions.
//!
//! # Architecture
//!
//! ```text
//! OCR text ──▶ Two-Pass Resolver ──▶ resolved drugs ──▶ Interaction Checker
//!                    │                                        │
//!          ┌─────────┼──────────┐                     Interaction Store
//!          ▼         ▼          ▼                             ▲
//!       Entity     Drug      Dosage                     label corpus
//!     Recognizer Normalizer Extractor                   (CorpusDb)
//!     (external) (TTL cache
//!                 + oracle)
//! ```
//!
//! Pass 1 resolves entities the recognizer labels as chemicals; Pass 2 runs
//! only when Pass 1 finds nothing and fuzzy-matches at most one drug from
//! the raw tokens. Interaction severity is mined from unstructured label
//! text, taking the worst case when manufacturers' labels disagree.
//!
//! The NER model and the vocabulary service are external collaborators,
//! consumed through the [`recognizer::EntityRecognizer`] and
//! [`vocabulary::VocabularyOracle`] traits. This crate is a library core; it
//! is a best-effort decision-support signal, not a medical authority.
//!
//! # Modules
//!
//! - [`models`]: Domain types (DosageMention, ResolvedDrug, SafetyRecord, etc.)
//! - [`dosage`]: Regex-driven dosage extraction
//! - [`recognizer`]: NER seam and span merging
//! - [`vocabulary`]: Normalization oracle seam and in-memory implementation
//! - [`resolver`]: Two-pass resolution (normalizer + TTL cache)
//! - [`interactions`]: Interaction store and pairwise checker
//! - [`db`]: SQLite label corpus

pub mod db;
pub mod dosage;
pub mod interactions;
pub mod models;
pub mod recognizer;
pub mod resolver;
pub mod vocabulary;

// Re-export commonly used types
pub use db::CorpusDb;
pub use dosage::extract_dosages;
pub use interactions::{InteractionChecker, InteractionStore, StoreError};
pub use models::{
    DosageMention, InteractionFinding, InteractionReport, Provenance, RecognizedEntity,
    ResolvedDrug, SafetyRecord, Severity,
};
pub use recognizer::{merge_token_spans, EntityRecognizer, RecognitionError};
pub use resolver::{DrugNormalizer, NormalizerConfig, TwoPassResolver};
pub use vocabulary::{DrugCandidate, DrugDetails, OracleError, VocabularyOracle};
