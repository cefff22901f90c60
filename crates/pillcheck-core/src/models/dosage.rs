//! Dosage mention model.

use serde::{Deserialize, Serialize};

/// A structured dosage mention parsed from packaging text.
///
/// Immutable once parsed. `value` is always non-negative (the extractor
/// only matches unsigned numbers). For compound dosages like "10 mg/5 ml"
/// both denominator fields are set; for per-unit dosages like "500 mg/tablet"
/// the denominator unit is the form word and the denominator value is 1.0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DosageMention {
    /// Original matched text, e.g. "400 mg"
    pub raw_text: String,
    /// Numeric value, e.g. 400.0
    pub value: f64,
    /// Unit string as matched, e.g. "mg"
    pub unit: String,
    /// Denominator value for compound dosages
    pub denominator_value: Option<f64>,
    /// Denominator unit ("ml") or form word ("tablet")
    pub denominator_unit: Option<String>,
}

impl DosageMention {
    /// A plain `<value> <unit>` mention with no denominator.
    pub fn simple(raw_text: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            value,
            unit: unit.into(),
            denominator_value: None,
            denominator_unit: None,
        }
    }

    /// True for compound and per-unit dosages.
    pub fn has_denominator(&self) -> bool {
        self.denominator_unit.is_some()
    }
}
