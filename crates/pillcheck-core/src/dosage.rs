//! Regex-driven dosage extraction from packaging text.
//!
//! Medicine packaging follows regulated formats, which makes dosages highly
//! predictable. Four shapes are recognized, most specific first:
//!
//! 1. Compound: `10 mg/5 ml`
//! 2. Per-unit: `500 mg/tablet`
//! 3. Simple: `400 mg`
//! 4. Percentage: `1%`
//!
//! At each scan position the matchers are tried in priority order and the
//! first success wins, so a compound dosage is never split into two simple
//! ones. Unparseable text yields an empty result, never an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::DosageMention;

/// Units commonly found on medicine packaging. `%` is handled by the
/// dedicated percentage shape.
const UNITS: &str = r"(?:mg|mcg|µg|g|ml|IU|mmol|mEq)";

/// Number with optional decimals; no thousands separators.
const NUM: &str = r"\d+\.?\d*";

/// Closed set of dose-form words accepted as a per-unit denominator.
const FORMS: &str = r"(?:tablet|capsule|dose|sachet|suppository|patch|vial|ampoule|puff)";

/// Dosage shape, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Compound,
    PerUnit,
    Simple,
    Percent,
}

/// Anchored matchers tried in order at every scan position.
fn matchers() -> &'static [(Shape, Regex)] {
    static MATCHERS: OnceLock<Vec<(Shape, Regex)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        let compound = format!(r"^(?i)({NUM})\s*({UNITS})\s*/\s*(\d*\.?\d*)\s*({UNITS})");
        let per_unit = format!(r"^(?i)({NUM})\s*({UNITS})\s*/\s*({FORMS})");
        let simple = format!(r"^(?i)({NUM})\s*({UNITS})");
        let percent = format!(r"^({NUM})\s*%");
        vec![
            (Shape::Compound, Regex::new(&compound).expect("valid regex")),
            (Shape::PerUnit, Regex::new(&per_unit).expect("valid regex")),
            (Shape::Simple, Regex::new(&simple).expect("valid regex")),
            (Shape::Percent, Regex::new(&percent).expect("valid regex")),
        ]
    })
}

/// Extract all dosage mentions from `text`, in order of appearance.
///
/// Pure function of the input; multiple independent mentions (e.g. two
/// ingredients of a combination drug) all appear in the output.
pub fn extract_dosages(text: &str) -> Vec<DosageMention> {
    let mut mentions = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        if !text.is_char_boundary(pos) {
            pos += 1;
            continue;
        }
        let rest = &text[pos..];
        // All shapes start with a digit; skip everything else cheaply.
        if !rest.as_bytes()[0].is_ascii_digit() {
            pos += 1;
            continue;
        }
        match match_at(rest) {
            Some((mention, len)) => {
                mentions.push(mention);
                pos += len;
            }
            None => pos += 1,
        }
    }

    mentions
}

/// Try each shape at the start of `rest`; first success wins.
fn match_at(rest: &str) -> Option<(DosageMention, usize)> {
    for (shape, re) in matchers() {
        let Some(caps) = re.captures(rest) else {
            continue;
        };
        let whole = caps.get(0)?;
        let raw = whole.as_str().to_string();
        let value = parse_num(caps.get(1)?.as_str())?;

        let mention = match shape {
            Shape::Compound => DosageMention {
                raw_text: raw,
                value,
                unit: caps.get(2)?.as_str().to_string(),
                // "200mg/ml" carries no denominator number; it means per 1 ml
                denominator_value: Some(parse_num(caps.get(3)?.as_str()).unwrap_or(1.0)),
                denominator_unit: Some(caps.get(4)?.as_str().to_string()),
            },
            Shape::PerUnit => DosageMention {
                raw_text: raw,
                value,
                unit: caps.get(2)?.as_str().to_string(),
                denominator_value: Some(1.0),
                denominator_unit: Some(caps.get(3)?.as_str().to_string()),
            },
            Shape::Simple => DosageMention::simple(raw, value, caps.get(2)?.as_str()),
            Shape::Percent => DosageMention::simple(raw, value, "%"),
        };
        return Some((mention, whole.end()));
    }
    None
}

/// Parse a matched number; empty captures yield `None`.
fn parse_num(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}
