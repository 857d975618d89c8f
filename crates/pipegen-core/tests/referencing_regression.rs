use pipegen_core::phase::PhaseState;
use pipegen_core::referencing::water_proton_shift_ppm;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("referencing_cases.json")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferencingFixtures {
    water_shift_cases: Vec<WaterShiftCase>,
    phase_cases: Vec<PhaseCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WaterShiftCase {
    id: String,
    temperature_celsius: f64,
    expected_ppm: f64,
    abs_tol: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhaseCase {
    id: String,
    prior: f64,
    delta: String,
    /// `null` means the delta must be skipped without changing the prior.
    expected_combined: Option<f64>,
}

fn load_fixtures() -> ReferencingFixtures {
    let source = fs::read_to_string(fixture_path()).expect("fixture file should be readable");
    serde_json::from_str(&source).expect("fixture file should deserialize")
}

#[test]
fn water_shift_cases_match_the_linear_fit() {
    for case in load_fixtures().water_shift_cases {
        let actual = water_proton_shift_ppm(case.temperature_celsius);
        assert!(
            (actual - case.expected_ppm).abs() <= case.abs_tol,
            "case '{}': expected {} ppm, got {} ppm",
            case.id,
            case.expected_ppm,
            actual
        );
    }
}

#[test]
fn phase_combination_cases_normalize_into_the_phase_interval() {
    for case in load_fixtures().phase_cases {
        let mut state = PhaseState::default();
        state.direct_zero_order = case.prior;
        let adjustment = state.apply_user_delta(&case.delta);

        match case.expected_combined {
            Some(expected) => {
                let adjustment = adjustment
                    .unwrap_or_else(|| panic!("case '{}': delta should apply", case.id));
                assert!(
                    (adjustment.combined - expected).abs() < 1.0e-9,
                    "case '{}': expected {}, got {}",
                    case.id,
                    expected,
                    adjustment.combined
                );
                assert!(
                    state.direct_zero_order >= 0.0 && state.direct_zero_order < 360.0,
                    "case '{}': combined phase escaped [0, 360)",
                    case.id
                );
            }
            None => {
                assert!(
                    adjustment.is_none(),
                    "case '{}': non-numeric delta should be skipped",
                    case.id
                );
                assert_eq!(state.direct_zero_order, case.prior);
            }
        }
    }
}
