//! Recognized entity models produced by the NER seam.

use serde::{Deserialize, Serialize};

/// A labeled span returned by an entity recognizer.
///
/// Offsets are half-open character ranges into the source text. The
/// recognizer is expected to hand this core whole-word spans with `O`
/// (outside) spans already removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognizedEntity {
    /// Matched text, surrounding whitespace trimmed
    pub text: String,
    /// Base label without B-/I- prefix, e.g. "CHEM"
    pub label: String,
    /// Model confidence in [0, 1]
    pub score: f64,
    /// Start of the span in the source text
    pub start: usize,
    /// End of the span (exclusive)
    pub end: usize,
}

/// A raw token-level span straight out of an NER model, before sub-word
/// merging. Labels still carry their B-/I- scheme prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTokenSpan {
    /// Scheme-prefixed label, e.g. "B-CHEM" or "I-CHEM"
    pub label: String,
    /// Model confidence for this token
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

impl RawTokenSpan {
    /// Label with the B-/I- scheme prefix stripped.
    pub fn base_label(&self) -> &str {
        match self.label.split_once('-') {
            Some((_, base)) => base,
            None => &self.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_label_strips_scheme_prefix() {
        let span = RawTokenSpan {
            label: "B-CHEM".into(),
            score: 0.9,
            start: 0,
            end: 4,
        };
        assert_eq!(span.base_label(), "CHEM");

        let plain = RawTokenSpan {
            label: "O".into(),
            score: 0.9,
            start: 0,
            end: 4,
        };
        assert_eq!(plain.base_label(), "O");
    }
}
