//! Interaction models: safety records, severity, findings and reports.

use serde::{Deserialize, Serialize};

/// One manufacturer label's free-text safety sections for a drug.
///
/// A drug may have many records (different manufacturers ship different
/// label text for the same substance). Immutable once loaded; the
/// interaction store owns the loaded collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyRecord {
    /// Vocabulary id from the source corpus, if present
    pub rxcui: Option<String>,
    /// Generic substance name, e.g. "IBUPROFEN"
    pub generic_name: Option<String>,
    /// Brand name on this label, e.g. "ADVIL"
    pub brand_name: Option<String>,
    /// Free text of the drug-interactions section
    pub interactions: String,
    /// Free text of the contraindications section
    pub contraindications: String,
    /// Free text of the warnings section
    pub warnings: String,
}

impl SafetyRecord {
    /// Names this record is indexed under (generic and/or brand), uppercased.
    pub fn owner_names(&self) -> Vec<String> {
        [&self.generic_name, &self.brand_name]
            .into_iter()
            .flatten()
            .filter(|n| !n.is_empty())
            .map(|n| n.to_uppercase())
            .collect()
    }
}

/// Coarse ordinal risk rating for an interaction finding.
///
/// Ordered so that `max` picks the worst case: Major > Moderate > Minor >
/// Unknown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Unknown,
    Minor,
    Moderate,
    Major,
}

/// A pairwise interaction finding, computed on demand.
///
/// `drug_a`/`drug_b` mirror the query order, not the direction in which the
/// evidence was found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionFinding {
    pub drug_a: String,
    pub drug_b: String,
    pub severity: Severity,
    /// Evidence snippet from the label text, wrapped with ellipses
    pub description: String,
    /// Fixed boilerplate pointing to the authoritative label
    pub management: String,
}

/// Aggregated result of checking an N-drug list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionReport {
    /// Findings in pair-iteration order
    #[serde(rename = "interactions")]
    pub findings: Vec<InteractionFinding>,
    /// True iff no findings
    #[serde(rename = "safe")]
    pub all_safe: bool,
}
