//! Golden tests for dosage extraction.
//!
//! Cases are real packaging strings; formats are legally regulated, so
//! these should stay stable.

use pillcheck_core::extract_dosages;

/// Expected shape of the first extracted mention.
struct GoldenCase {
    id: &'static str,
    input: &'static str,
    expected_count: usize,
    expected_value: f64,
    expected_unit: &'static str,
    expected_denominator_value: Option<f64>,
    expected_denominator_unit: Option<&'static str>,
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "brufen-film-coated",
            input: "BRUFEN Ibuprofen 400 mg Film-Coated Tablets",
            expected_count: 1,
            expected_value: 400.0,
            expected_unit: "mg",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "paracetamol-no-space",
            input: "Paracetamol 500mg tablets",
            expected_count: 1,
            expected_value: 500.0,
            expected_unit: "mg",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "vitamin-d-iu",
            input: "Vitamin D3 1000 IU capsules",
            expected_count: 1,
            expected_value: 1000.0,
            expected_unit: "IU",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "levothyroxine-mcg",
            input: "Levothyroxine 50 mcg tablets",
            expected_count: 1,
            expected_value: 50.0,
            expected_unit: "mcg",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "metformin-salt-name",
            input: "Metformin HCl 850 mg",
            expected_count: 1,
            expected_value: 850.0,
            expected_unit: "mg",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "alprazolam-decimal",
            input: "Alprazolam 0.5 mg tablets",
            expected_count: 1,
            expected_value: 0.5,
            expected_unit: "mg",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "amoxicillin-gram",
            input: "Amoxicillin 1 g powder",
            expected_count: 1,
            expected_value: 1.0,
            expected_unit: "g",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "ibuprofen-suspension-compound",
            input: "Ibuprofen 10 mg/5 ml oral suspension",
            expected_count: 1,
            expected_value: 10.0,
            expected_unit: "mg",
            expected_denominator_value: Some(5.0),
            expected_denominator_unit: Some("ml"),
        },
        GoldenCase {
            id: "amoxicillin-compound-tight",
            input: "Amoxicillin 500mg/5ml",
            expected_count: 1,
            expected_value: 500.0,
            expected_unit: "mg",
            expected_denominator_value: Some(5.0),
            expected_denominator_unit: Some("ml"),
        },
        GoldenCase {
            id: "insulin-per-ml",
            input: "Insulin 100 IU/ml",
            expected_count: 1,
            expected_value: 100.0,
            expected_unit: "IU",
            expected_denominator_value: Some(1.0),
            expected_denominator_unit: Some("ml"),
        },
        GoldenCase {
            id: "salbutamol-per-dose",
            input: "Salbutamol 100 mcg/dose inhaler",
            expected_count: 1,
            expected_value: 100.0,
            expected_unit: "mcg",
            expected_denominator_value: Some(1.0),
            expected_denominator_unit: Some("dose"),
        },
        GoldenCase {
            id: "per-tablet",
            input: "500 mg/tablet",
            expected_count: 1,
            expected_value: 500.0,
            expected_unit: "mg",
            expected_denominator_value: Some(1.0),
            expected_denominator_unit: Some("tablet"),
        },
        GoldenCase {
            id: "hydrocortisone-percent",
            input: "Hydrocortisone 1% cream",
            expected_count: 1,
            expected_value: 1.0,
            expected_unit: "%",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "betamethasone-decimal-percent",
            input: "Betamethasone 0.1% ointment",
            expected_count: 1,
            expected_value: 0.1,
            expected_unit: "%",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "fentanyl-microgram-symbol",
            input: "Fentanyl 25 µg/hr patch",
            expected_count: 1,
            expected_value: 25.0,
            expected_unit: "µg",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "potassium-mmol",
            input: "Potassium chloride 10 mmol effervescent",
            expected_count: 1,
            expected_value: 10.0,
            expected_unit: "mmol",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
        GoldenCase {
            id: "co-amoxiclav-combination",
            input: "Amoxicillin 500 mg / Clavulanic Acid 125 mg",
            expected_count: 2,
            expected_value: 500.0,
            expected_unit: "mg",
            expected_denominator_value: None,
            expected_denominator_unit: None,
        },
    ]
}

#[test]
fn test_golden_dosage_cases() {
    for case in golden_cases() {
        let result = extract_dosages(case.input);
        assert_eq!(
            result.len(),
            case.expected_count,
            "case {}: expected {} mentions, got {:?}",
            case.id,
            case.expected_count,
            result
        );

        let first = &result[0];
        assert_eq!(first.value, case.expected_value, "case {}", case.id);
        assert_eq!(first.unit, case.expected_unit, "case {}", case.id);
        assert_eq!(
            first.denominator_value, case.expected_denominator_value,
            "case {}",
            case.id
        );
        assert_eq!(
            first.denominator_unit.as_deref(),
            case.expected_denominator_unit,
            "case {}",
            case.id
        );
    }
}

#[test]
fn test_unparseable_text_yields_empty() {
    assert!(extract_dosages("Take with food and water").is_empty());
    assert!(extract_dosages("Store below 25 degrees").is_empty());
    assert!(extract_dosages("").is_empty());
}
