//! Phase-correction state carried forward between runs.
//!
//! The previously generated script is the only persistence the tool has:
//! the phase values tuned into its `PS` stages are read back before the
//! script is overwritten. Parsing and rendering of that stage line live
//! here as an explicit pair so the round trip stays bit-compatible.

use serde::Serialize;
use std::fs;
use std::path::Path;

/// Prefix of a phase-correction stage line in a generated script.
pub const PHASE_STAGE_PREFIX: &str = "| nmrPipe -fn PS";

const TOKEN_INDEX_P0: usize = 5;
const TOKEN_INDEX_P1: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseState {
    pub direct_zero_order: f64,
    pub direct_first_order: f64,
    pub indirect_zero_order: f64,
    pub indirect_first_order: f64,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            direct_zero_order: 150.0,
            direct_first_order: 0.0,
            indirect_zero_order: 0.0,
            indirect_first_order: 0.0,
        }
    }
}

/// Record of a user phase delta applied to the direct zero-order phase,
/// kept for reporting back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseAdjustment {
    pub previous: f64,
    pub delta: f64,
    pub combined: f64,
}

impl PhaseState {
    /// Recovers phase state from a previously generated script. The first
    /// phase-correction stage populates the direct-dimension coefficients,
    /// the second the indirect ones; later matches are ignored. A missing
    /// or non-numeric field keeps its default — this is a best-effort
    /// hint, not validation.
    pub fn from_script(source: &str) -> Self {
        let mut state = Self::default();
        let mut matches = 0_usize;

        for line in source.lines() {
            if !line.starts_with(PHASE_STAGE_PREFIX) {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match matches {
                0 => {
                    if let Some(value) = token_f64(&tokens, TOKEN_INDEX_P0) {
                        state.direct_zero_order = value;
                    }
                    if let Some(value) = token_f64(&tokens, TOKEN_INDEX_P1) {
                        state.direct_first_order = value;
                    }
                }
                1 => {
                    if let Some(value) = token_f64(&tokens, TOKEN_INDEX_P0) {
                        state.indirect_zero_order = value;
                    }
                    if let Some(value) = token_f64(&tokens, TOKEN_INDEX_P1) {
                        state.indirect_first_order = value;
                    }
                }
                _ => break,
            }
            matches += 1;
        }

        state
    }

    /// Reads a prior script if one exists; a missing or unreadable file
    /// yields the defaults.
    pub fn from_script_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(source) => Self::from_script(&source),
            Err(_) => Self::default(),
        }
    }

    /// Applies a user-supplied zero-order phase delta to the direct
    /// dimension, normalizing into `[0, 360)`. A non-numeric delta is
    /// skipped without error and `None` is returned.
    pub fn apply_user_delta(&mut self, delta: &str) -> Option<PhaseAdjustment> {
        let delta: f64 = delta.trim().parse().ok()?;
        let previous = self.direct_zero_order;
        let combined = (previous + delta).rem_euclid(360.0);
        self.direct_zero_order = combined;
        Some(PhaseAdjustment {
            previous,
            delta,
            combined,
        })
    }
}

/// Renders a phase-correction stage line, continuation backslash included.
/// `PhaseState::from_script` reads this exact shape back.
pub fn phase_stage_line(zero_order: f64, first_order: f64) -> String {
    format!(
        "{prefix} -p0 {p0:>6} -p1 {p1:>6} -di -verb        \\",
        prefix = PHASE_STAGE_PREFIX,
        p0 = format_phase(zero_order),
        p1 = format_phase(first_order),
    )
}

pub fn format_phase(value: f64) -> String {
    format!("{value:5.1}")
}

fn token_f64(tokens: &[&str], index: usize) -> Option<f64> {
    tokens.get(index).and_then(|token| token.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::{PhaseState, phase_stage_line};

    #[test]
    fn missing_script_text_yields_the_defaults() {
        let state = PhaseState::from_script("#!/bin/csh\n\nnmrPipe -in test.fid\n");
        assert_eq!(state, PhaseState::default());
        assert_eq!(state.direct_zero_order, 150.0);
    }

    #[test]
    fn first_and_second_stage_lines_fill_direct_then_indirect() {
        let source = "\
nmrPipe   -in test.fid \\
| nmrPipe -fn PS -p0   10.0 -p1    5.0 -di -verb        \\
| nmrPipe -fn TP                                        \\
| nmrPipe -fn PS -p0   20.0 -p1    0.0 -di -verb        \\
";
        let state = PhaseState::from_script(source);
        assert_eq!(state.direct_zero_order, 10.0);
        assert_eq!(state.direct_first_order, 5.0);
        assert_eq!(state.indirect_zero_order, 20.0);
        assert_eq!(state.indirect_first_order, 0.0);
    }

    #[test]
    fn non_numeric_fields_keep_their_defaults() {
        let source = "| nmrPipe -fn PS -p0 broken -p1   12.5 -di -verb        \\\n";
        let state = PhaseState::from_script(source);
        assert_eq!(state.direct_zero_order, 150.0);
        assert_eq!(state.direct_first_order, 12.5);
    }

    #[test]
    fn truncated_stage_line_keeps_every_default() {
        let state = PhaseState::from_script("| nmrPipe -fn PS\n");
        assert_eq!(state, PhaseState::default());
    }

    #[test]
    fn stage_lines_beyond_the_second_are_ignored() {
        let source = "\
| nmrPipe -fn PS -p0   10.0 -p1    0.0 -di -verb        \\
| nmrPipe -fn PS -p0   20.0 -p1    0.0 -di -verb        \\
| nmrPipe -fn PS -p0   99.0 -p1   99.0 -di -verb        \\
";
        let state = PhaseState::from_script(source);
        assert_eq!(state.indirect_zero_order, 20.0);
        assert_eq!(state.indirect_first_order, 0.0);
    }

    #[test]
    fn user_delta_combines_modulo_360() {
        let mut state = PhaseState::default();
        state.direct_zero_order = 350.0;
        let adjustment = state
            .apply_user_delta("15.0")
            .expect("numeric delta should apply");
        assert_eq!(adjustment.previous, 350.0);
        assert_eq!(adjustment.combined, 5.0);
        assert_eq!(state.direct_zero_order, 5.0);
    }

    #[test]
    fn negative_delta_normalizes_into_the_phase_interval() {
        let mut state = PhaseState::default();
        state.direct_zero_order = 10.0;
        let adjustment = state
            .apply_user_delta("-30")
            .expect("numeric delta should apply");
        assert_eq!(adjustment.combined, 340.0);
        assert!(state.direct_zero_order >= 0.0 && state.direct_zero_order < 360.0);
    }

    #[test]
    fn non_numeric_delta_is_skipped_without_error() {
        let mut state = PhaseState::default();
        assert!(state.apply_user_delta("noplot").is_none());
        assert_eq!(state.direct_zero_order, 150.0);
    }

    #[test]
    fn rendered_stage_line_parses_back_to_the_same_values() {
        let script = format!("{}\n{}\n", phase_stage_line(25.0, 5.0), phase_stage_line(20.0, 0.0));
        let state = PhaseState::from_script(&script);
        assert_eq!(state.direct_zero_order, 25.0);
        assert_eq!(state.direct_first_order, 5.0);
        assert_eq!(state.indirect_zero_order, 20.0);
        assert_eq!(state.indirect_first_order, 0.0);
    }
}
