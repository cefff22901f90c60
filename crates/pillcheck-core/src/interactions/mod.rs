//! Interaction-severity store over unstructured label text.
//!
//! Labels are free text, so interaction evidence is found by whole-word
//! keyword search across a drug's safety sections. Different manufacturers
//! ship different label text for the same substance; when labels disagree
//! the store assumes the worst case.

mod checker;

pub use checker::*;

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::models::{InteractionFinding, SafetyRecord, Severity};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Querying before `load` is a startup-ordering bug, not "no interaction".
    #[error("Interaction corpus not loaded — call load() first")]
    CorpusNotLoaded,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Characters of context kept on each side of an evidence match.
const SNIPPET_WINDOW: usize = 100;

/// The store mines evidence, it does not synthesize clinical guidance.
const MANAGEMENT_ADVICE: &str =
    "See the official product label for complete prescribing information.";

/// Severity and snippet found in one direction of a pair lookup.
struct LabelEvidence {
    severity: Severity,
    snippet: String,
}

/// In-memory index of safety records, keyed by uppercase owner name.
///
/// Explicit lifecycle: constructed empty, populated by one [`load`] call,
/// read-only thereafter. Reloading fully replaces prior state.
///
/// [`load`]: InteractionStore::load
#[derive(Debug, Default)]
pub struct InteractionStore {
    index: HashMap<String, Vec<SafetyRecord>>,
    record_count: usize,
    loaded: bool,
}

impl InteractionStore {
    /// Create an empty, unloaded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest safety records, replacing any previously loaded state.
    ///
    /// Each record is indexed under every owner name it carries (generic
    /// and/or brand), so one name maps to many records.
    pub fn load(&mut self, records: Vec<SafetyRecord>) {
        let mut index: HashMap<String, Vec<SafetyRecord>> = HashMap::new();
        self.record_count = records.len();
        for record in records {
            for name in record.owner_names() {
                index.entry(name).or_default().push(record.clone());
            }
        }
        info!(
            records = self.record_count,
            drugs = index.len(),
            "interaction corpus loaded"
        );
        self.index = index;
        self.loaded = true;
    }

    /// Check whether two drugs have a known interaction.
    ///
    /// Case-insensitive; order does not change the inferred severity. The
    /// A-direction (A as target inside B's labels) is tried first, then the
    /// reverse; the finding's `drug_a`/`drug_b` mirror the query order
    /// either way.
    pub fn check_interaction(
        &self,
        drug_a: &str,
        drug_b: &str,
    ) -> StoreResult<Option<InteractionFinding>> {
        if !self.loaded {
            return Err(StoreError::CorpusNotLoaded);
        }

        let evidence = self
            .find_in_label(drug_a, drug_b)
            .or_else(|| self.find_in_label(drug_b, drug_a));

        Ok(evidence.map(|ev| InteractionFinding {
            drug_a: drug_a.to_string(),
            drug_b: drug_b.to_string(),
            severity: ev.severity,
            description: ev.snippet,
            management: MANAGEMENT_ADVICE.to_string(),
        }))
    }

    /// Search `target` in every label owned by `owner`, keeping the worst
    /// severity found across records.
    fn find_in_label(&self, target: &str, owner: &str) -> Option<LabelEvidence> {
        let records = self.index.get(&owner.to_uppercase())?;
        let pattern = word_pattern(target)?;

        let mut best: Option<LabelEvidence> = None;
        for record in records {
            let buffer = format!(
                "{} {} {}",
                record.interactions, record.contraindications, record.warnings
            );
            let Some(m) = pattern.find(&buffer) else {
                continue;
            };

            // A contraindicated combination outranks a mere warning mention.
            let severity = if pattern.is_match(&record.contraindications) {
                Severity::Major
            } else {
                Severity::Moderate
            };

            if best.as_ref().map_or(true, |b| severity > b.severity) {
                let evidence = LabelEvidence {
                    severity,
                    snippet: snippet(&buffer, m.start(), m.end()),
                };
                // Severity cannot exceed Major; stop scanning this owner.
                if severity == Severity::Major {
                    return Some(evidence);
                }
                best = Some(evidence);
            }
        }
        best
    }

    /// Number of records passed to the last `load`.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of distinct indexed drug names.
    pub fn drug_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

/// Whole-word, case-insensitive pattern for a drug name.
fn word_pattern(target: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(target))).ok()
}

/// Evidence window around the first match, clamped to char boundaries,
/// trimmed and wrapped with ellipses.
fn snippet(buffer: &str, match_start: usize, match_end: usize) -> String {
    let mut start = match_start.saturating_sub(SNIPPET_WINDOW);
    while start > 0 && !buffer.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (match_end + SNIPPET_WINDOW).min(buffer.len());
    while end < buffer.len() && !buffer.is_char_boundary(end) {
        end += 1;
    }
    format!("...{}...", buffer[start..end].trim())
}
