//! Entity recognizer seam.
//!
//! The NER model itself is an external capability; this core only defines
//! the contract and a span-merging helper for implementations whose
//! tokenizers emit sub-word pieces.

use thiserror::Error;

use crate::models::{RawTokenSpan, RecognizedEntity};

/// Recognition errors.
#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("Recognizer unavailable: {0}")]
    Unavailable(String),
}

pub type RecognitionResult<T> = Result<T, RecognitionError>;

/// Black-box NER capability: labeled spans with confidence scores.
///
/// Implementations must merge sub-word continuation tokens into whole-word
/// spans (see [`merge_token_spans`]) and exclude `O`-labeled spans before
/// handing results to this core. A recognizer that is not ready must return
/// [`RecognitionError::Unavailable`] rather than an empty result.
pub trait EntityRecognizer {
    fn predict(&self, text: &str) -> RecognitionResult<Vec<RecognizedEntity>>;
}

/// Merge raw token spans into whole-word entities.
///
/// Some tokenizers lack sub-word markers, so continuation tokens arrive
/// labeled `B-` instead of `I-`. Adjacent spans are merged when they share a
/// base label, are contiguous, and the bridged text is purely alphabetic.
/// A merged span keeps the minimum token score. `O` spans are dropped.
pub fn merge_token_spans(text: &str, spans: &[RawTokenSpan]) -> Vec<RecognizedEntity> {
    let mut merged: Vec<RawTokenSpan> = Vec::new();

    for span in spans {
        if let Some(prev) = merged.last_mut() {
            let bridged = text.get(prev.end..span.end).unwrap_or("");
            if span.base_label() == prev.base_label()
                && span.start == prev.end
                && !bridged.is_empty()
                && bridged.chars().all(|c| c.is_alphabetic())
            {
                prev.end = span.end;
                prev.score = prev.score.min(span.score);
                continue;
            }
        }
        merged.push(span.clone());
    }

    merged
        .into_iter()
        .filter(|s| s.base_label() != "O")
        .map(|s| RecognizedEntity {
            text: text.get(s.start..s.end).unwrap_or("").trim().to_string(),
            label: s.base_label().to_string(),
            score: s.score,
            start: s.start,
            end: s.end,
        })
        .collect()
}
