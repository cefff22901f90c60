//! Vocabulary oracle seam.
//!
//! The upstream drug-vocabulary service (exact lookup, approximate search,
//! details by id) is an external collaborator. This module defines the
//! contract plus [`MemoryVocabulary`], an in-process implementation over a
//! seeded concept list, used for tests and offline operation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

/// Oracle errors. Transport failures are retryable by the caller; the
/// oracle itself never retries.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Normalization service unavailable: {0}")]
    Unavailable(String),
}

pub type OracleResult<T> = Result<T, OracleError>;

/// A ranked candidate from approximate search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugCandidate {
    pub canonical_id: String,
    pub display_name: String,
}

/// Details for a canonical concept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugDetails {
    pub display_name: String,
    /// Free-form attributes, e.g. term type or dose form
    pub attributes: HashMap<String, String>,
}

/// Black-box normalization capability.
///
/// "Not found" is a valid answer (`Ok(None)` / empty vec); only transport
/// failures surface as [`OracleError::Unavailable`].
pub trait VocabularyOracle {
    /// Resolve an exact drug name to its canonical id.
    fn lookup_canonical(&self, name: &str) -> OracleResult<Option<String>>;

    /// Fuzzy search returning up to `max` candidates, best match first.
    fn approximate_search(&self, term: &str, max: usize) -> OracleResult<Vec<DrugCandidate>>;

    /// Fetch details for a canonical id.
    fn fetch_details(&self, canonical_id: &str) -> OracleResult<Option<DrugDetails>>;
}

/// One seeded concept in the in-memory vocabulary.
#[derive(Debug, Clone)]
pub struct VocabularyEntry {
    pub canonical_id: String,
    pub display_name: String,
    /// Brand names and other synonyms that resolve to this concept
    pub synonyms: Vec<String>,
    pub attributes: HashMap<String, String>,
}

impl VocabularyEntry {
    pub fn new(canonical_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            canonical_id: canonical_id.into(),
            display_name: display_name.into(),
            synonyms: Vec::new(),
            attributes: HashMap::new(),
        }
    }
}

/// Minimum similarity for an approximate-search hit.
const MIN_SIMILARITY: f64 = 0.82;

/// In-memory vocabulary backed by fuzzy string matching.
pub struct MemoryVocabulary {
    entries: Vec<VocabularyEntry>,
}

impl MemoryVocabulary {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }

    /// Best similarity between `term` and any name of `entry`.
    fn entry_similarity(entry: &VocabularyEntry, term: &str) -> f64 {
        let name_sim = fuzzy_match(term, &entry.display_name.to_lowercase());
        let synonym_sim = entry
            .synonyms
            .iter()
            .map(|s| fuzzy_match(term, &s.to_lowercase()))
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(0.0);
        name_sim.max(synonym_sim)
    }
}

impl VocabularyOracle for MemoryVocabulary {
    fn lookup_canonical(&self, name: &str) -> OracleResult<Option<String>> {
        let lower = name.to_lowercase();
        let hit = self.entries.iter().find(|e| {
            e.display_name.to_lowercase() == lower
                || e.synonyms.iter().any(|s| s.to_lowercase() == lower)
        });
        Ok(hit.map(|e| e.canonical_id.clone()))
    }

    fn approximate_search(&self, term: &str, max: usize) -> OracleResult<Vec<DrugCandidate>> {
        let lower = term.to_lowercase();
        let mut scored: Vec<(f64, &VocabularyEntry)> = self
            .entries
            .iter()
            .map(|e| (Self::entry_similarity(e, &lower), e))
            .filter(|(sim, _)| *sim >= MIN_SIMILARITY)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(max)
            .map(|(_, e)| DrugCandidate {
                canonical_id: e.canonical_id.clone(),
                display_name: e.display_name.clone(),
            })
            .collect())
    }

    fn fetch_details(&self, canonical_id: &str) -> OracleResult<Option<DrugDetails>> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.canonical_id == canonical_id)
            .map(|e| DrugDetails {
                display_name: e.display_name.clone(),
                attributes: e.attributes.clone(),
            }))
    }
}

/// Combined fuzzy similarity: Jaro-Winkler favors shared prefixes (typical
/// typo shape for drug names), Levenshtein tracks overall edit distance.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);
    jw * 0.6 + lev * 0.4
}
