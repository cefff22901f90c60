//! Resolved drug model produced by the two-pass resolver.

use serde::{Deserialize, Serialize};

/// Which resolution pass produced a [`ResolvedDrug`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Pass 1: the NER model recognized the name directly
    Recognized,
    /// Pass 2: fuzzy vocabulary search matched a text token
    FallbackMatched,
}

/// A normalized drug identity with dosage annotation.
///
/// Created once per analysis call and never mutated afterwards. Within one
/// analysis, drugs are deduplicated by case-insensitive display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedDrug {
    /// Canonical vocabulary identifier, if the name resolved
    pub canonical_id: Option<String>,
    /// Human-readable drug name
    pub display_name: String,
    /// Raw text of the first dosage mention in the source text
    pub dosage: Option<String>,
    /// Dose form if known, e.g. "tablet"
    pub formulation: Option<String>,
    /// Which pass produced this drug
    pub provenance: Provenance,
    /// Confidence in [0, 1]; fallback matches use a fixed 0.5
    pub confidence: f64,
}
