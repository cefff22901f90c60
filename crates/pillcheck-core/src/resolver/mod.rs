//! Two-pass drug resolution.
//!
//! Pass 1: NER extracts chemical entities, each resolved to a canonical id.
//! Pass 2 (fallback, only when Pass 1 finds nothing): fuzzy vocabulary
//! search over the text tokens, stopping at the first hit.
//!
//! Both passes annotate results with the first dosage mention found in the
//! full text.

mod cache;
mod normalizer;

pub use cache::*;
pub use normalizer::*;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::dosage::extract_dosages;
use crate::models::{Provenance, RecognizedEntity, ResolvedDrug};
use crate::recognizer::{EntityRecognizer, RecognitionError};

/// Fixed confidence for fallback matches; fuzzy search over arbitrary
/// tokens is much weaker evidence than a recognizer hit.
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Tokens shorter than this never reach fuzzy search.
const MIN_TOKEN_CHARS: usize = 3;

/// Punctuation stripped from the ends of fallback tokens.
const TOKEN_PUNCT: &[char] = &[',', '.', ';', ':', '(', ')', '[', ']'];

/// Attribute key the oracle uses for dose forms.
const DOSE_FORM_ATTR: &str = "dose_form";

/// Orchestrates recognizer, normalizer and dosage extractor.
///
/// Holds no state across calls; the outcome is a pure function of the text
/// and the collaborators' answers.
pub struct TwoPassResolver<'a> {
    recognizer: &'a dyn EntityRecognizer,
    normalizer: &'a DrugNormalizer<'a>,
}

impl<'a> TwoPassResolver<'a> {
    pub fn new(recognizer: &'a dyn EntityRecognizer, normalizer: &'a DrugNormalizer<'a>) -> Self {
        Self {
            recognizer,
            normalizer,
        }
    }

    /// Analyze packaging text and return resolved drugs in first-seen order.
    ///
    /// Zero resolvable drugs is a valid outcome, not an error. A
    /// normalization failure omits the affected candidate rather than
    /// aborting the analysis; an unavailable recognizer degrades to
    /// fallback-only resolution.
    pub fn analyze(&self, text: &str) -> Vec<ResolvedDrug> {
        // Dosage is global-text context shared by both passes, deliberately
        // not scoped to individual entity spans.
        let dosage = extract_dosages(text).into_iter().next().map(|d| d.raw_text);

        let entities = match self.recognizer.predict(text) {
            Ok(entities) => entities,
            Err(RecognitionError::Unavailable(reason)) => {
                warn!(%reason, "recognizer unavailable, degrading to fallback-only resolution");
                Vec::new()
            }
        };

        let drug_entities: Vec<RecognizedEntity> = entities
            .into_iter()
            .filter(|e| is_chemical_label(&e.label) && !is_purely_numeric(&e.text))
            .collect();

        if !drug_entities.is_empty() {
            debug!(count = drug_entities.len(), "recognizer found drug entities");
            return self.enrich_recognized(&drug_entities, dosage.as_deref());
        }

        debug!("recognizer found no drug entities, trying vocabulary fallback");
        self.vocabulary_fallback(text, dosage.as_deref())
    }

    /// Pass 1: resolve recognizer entities, deduplicated case-insensitively
    /// in first-seen order.
    fn enrich_recognized(
        &self,
        entities: &[RecognizedEntity],
        dosage: Option<&str>,
    ) -> Vec<ResolvedDrug> {
        let mut seen = HashSet::new();
        let mut drugs = Vec::new();

        for entity in entities {
            let name = entity.text.trim();
            if name.is_empty() || !seen.insert(name.to_lowercase()) {
                continue;
            }

            let canonical_id = match self.normalizer.resolve_canonical(name) {
                Ok(id) => id,
                Err(err) => {
                    warn!(drug = %name, error = %err, "normalization failed, omitting candidate");
                    continue;
                }
            };

            drugs.push(ResolvedDrug {
                canonical_id,
                display_name: name.to_string(),
                dosage: dosage.map(str::to_string),
                formulation: None,
                provenance: Provenance::Recognized,
                confidence: entity.score,
            });
        }

        drugs
    }

    /// Pass 2: fuzzy-search text tokens, returning at most one drug.
    ///
    /// Stopping at the first hit is deliberate: matching every common word
    /// against the vocabulary floods the result with false positives.
    fn vocabulary_fallback(&self, text: &str, dosage: Option<&str>) -> Vec<ResolvedDrug> {
        let mut tried = HashSet::new();

        for token in text.split_whitespace() {
            let clean = token.trim_matches(TOKEN_PUNCT);
            if clean.chars().count() < MIN_TOKEN_CHARS || !tried.insert(clean.to_lowercase()) {
                continue;
            }

            let candidates = match self.normalizer.fuzzy_candidates(clean) {
                Ok(candidates) => candidates,
                Err(err) => {
                    warn!(token = %clean, error = %err, "fuzzy search failed, skipping token");
                    continue;
                }
            };
            let Some(best) = candidates.into_iter().next() else {
                continue;
            };

            let details = match self.normalizer.details_for(&best.canonical_id) {
                Ok(details) => details,
                Err(err) => {
                    warn!(id = %best.canonical_id, error = %err, "details lookup failed");
                    None
                }
            };
            let (display_name, formulation) = match details {
                Some(d) => (d.display_name, d.attributes.get(DOSE_FORM_ATTR).cloned()),
                None => (best.display_name, None),
            };

            debug!(token = %clean, drug = %display_name, "fallback matched");
            return vec![ResolvedDrug {
                canonical_id: Some(best.canonical_id),
                display_name,
                dosage: dosage.map(str::to_string),
                formulation,
                provenance: Provenance::FallbackMatched,
                confidence: FALLBACK_CONFIDENCE,
            }];
        }

        Vec::new()
    }
}

/// Labels that denote a chemical/drug entity class.
fn is_chemical_label(label: &str) -> bool {
    label.eq_ignore_ascii_case("chem") || label.eq_ignore_ascii_case("chemical")
}

/// OCR noise often tags bare numbers as entities; they are never drug names.
fn is_purely_numeric(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}
