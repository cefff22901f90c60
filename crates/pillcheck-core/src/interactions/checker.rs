//! Pairwise interaction checking over an N-drug list.

use tracing::info;

use crate::models::InteractionReport;

use super::{InteractionStore, StoreResult};

/// Expands a drug list into all unordered pairs and aggregates the store's
/// per-pair answers into a report.
pub struct InteractionChecker<'a> {
    store: &'a InteractionStore,
}

impl<'a> InteractionChecker<'a> {
    pub fn new(store: &'a InteractionStore) -> Self {
        Self { store }
    }

    /// Check all C(N,2) pairs exactly once, in nested-pass order.
    ///
    /// Findings are appended in pair-iteration order; `all_safe` is true iff
    /// there are none. Lists of 0 or 1 drugs have no pairs and are trivially
    /// safe.
    pub fn check(&self, drug_names: &[String]) -> StoreResult<InteractionReport> {
        let mut findings = Vec::new();

        for (i, drug_a) in drug_names.iter().enumerate() {
            for drug_b in &drug_names[i + 1..] {
                if let Some(finding) = self.store.check_interaction(drug_a, drug_b)? {
                    info!(
                        drug_a = %drug_a,
                        drug_b = %drug_b,
                        severity = ?finding.severity,
                        "interaction found"
                    );
                    findings.push(finding);
                }
            }
        }

        let all_safe = findings.is_empty();
        Ok(InteractionReport { findings, all_safe })
    }
}
