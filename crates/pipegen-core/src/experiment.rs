//! Experiment classification: dimensionality, second-dimension nucleus,
//! pseudo-3D detection, extraction defaulting, and the symmetric-sampling
//! window rule.

use crate::domain::{ConvertRequest, ExtractRange, Nucleus, PipeError, PipeResult};
use crate::procpar::ProcparStore;
use serde::Serialize;

/// Built-in proton extraction window applied to 2D experiments when the
/// caller does not request one.
pub const DEFAULT_PROTON_WINDOW_PPM: (f64, f64) = (15.0, 5.0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExperimentLayout {
    OneDimensional,
    TwoDimensional,
    /// A 2D acquisition repeated across an extra indexed axis; the fid
    /// holds one plane per value of the arrayed parameter.
    PseudoThreeDimensional {
        arrayed_parameter: String,
        plane_count: usize,
    },
}

impl ExperimentLayout {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneDimensional => "1D",
            Self::TwoDimensional => "2D",
            Self::PseudoThreeDimensional { .. } => "pseudo-3D",
        }
    }

    pub fn is_multi_fid(&self) -> bool {
        matches!(self, Self::PseudoThreeDimensional { .. })
    }
}

/// Indirect-dimension processing window: apodization scale constant plus
/// the zero- and first-order phases rendered into the script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndirectWindow {
    pub zero_order: f64,
    pub first_order: f64,
    pub scale: f64,
}

impl IndirectWindow {
    const STANDARD: Self = Self {
        zero_order: 0.0,
        first_order: 0.0,
        scale: 0.5,
    };

    /// Symmetric half-dwell sampling shifts the first-order phase by a
    /// full 180 degrees and drops the first-point scaling.
    const HALF_DWELL: Self = Self {
        zero_order: -90.0,
        first_order: 180.0,
        scale: 1.0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentShape {
    pub layout: ExperimentLayout,
    pub second_dimension: Nucleus,
    pub extract: Option<ExtractRange>,
    pub trosy: bool,
    pub fast_process: bool,
    pub indirect_window: IndirectWindow,
    /// Pulse sequence name, reported to the user.
    pub sequence: String,
}

/// Parameter names carrying the indirect dimension for a given nucleus
/// selection: sweep width, observe frequency, axis label.
pub const fn second_dimension_parameters(nucleus: Nucleus) -> (&'static str, &'static str, &'static str) {
    match nucleus {
        Nucleus::Nitrogen => ("sw1", "dfrq2", "dn2"),
        // Proton is not a valid indirect selection here; fall back to the
        // carbon triple the way the original tool did for "not nitrogen".
        Nucleus::Carbon | Nucleus::Hydrogen => ("sw1", "dfrq", "dn"),
    }
}

pub fn classify(store: &ProcparStore, request: &ConvertRequest) -> PipeResult<ExperimentShape> {
    let sequence = store.require_first("seqfil")?.to_string();
    let two_dimensional = is_two_dimensional(store);

    let layout = if two_dimensional {
        match arrayed_parameter(store)? {
            Some(name) => {
                let planes = store.require_first(&name)?.split_whitespace().count();
                if planes == 0 {
                    return Err(PipeError::input_validation(
                        "INPUT.ARRAY_EMPTY",
                        format!("arrayed parameter '{name}' has no values"),
                    ));
                }
                ExperimentLayout::PseudoThreeDimensional {
                    arrayed_parameter: name,
                    plane_count: planes,
                }
            }
            None => ExperimentLayout::TwoDimensional,
        }
    } else {
        ExperimentLayout::OneDimensional
    };

    let extract = match request.extract {
        Some(range) => Some(range),
        None if two_dimensional => Some(ExtractRange::new(
            DEFAULT_PROTON_WINDOW_PPM.0,
            DEFAULT_PROTON_WINDOW_PPM.1,
        )),
        None => None,
    };

    let indirect_window = if two_dimensional && half_dwell_sampling(store) {
        IndirectWindow::HALF_DWELL
    } else {
        IndirectWindow::STANDARD
    };

    Ok(ExperimentShape {
        layout,
        second_dimension: request.second_dimension,
        extract,
        trosy: sequence.contains("trosy"),
        fast_process: request.fast_process,
        indirect_window,
        sequence,
    })
}

/// An experiment is 2D only when both indirect point counts are present
/// and at least one differs from "1"; a missing count means 1D.
fn is_two_dimensional(store: &ProcparStore) -> bool {
    match (store.first("ni"), store.first("ni2")) {
        (Some(ni), Some(ni2)) => ni != "1" || ni2 != "1",
        _ => false,
    }
}

/// Scans the quoted, comma-separated `array` descriptor for an element
/// whose name does not contain "phase"; such an element names the arrayed
/// parameter of a multi-FID acquisition. The last one listed wins.
fn arrayed_parameter(store: &ProcparStore) -> PipeResult<Option<String>> {
    let descriptor = store.require_first("array")?;
    let unquoted = strip_enclosing(descriptor);

    let mut arrayed = None;
    for element in unquoted.split(',') {
        if !element.contains("phase") && !element.is_empty() {
            arrayed = Some(element.to_string());
        }
    }
    Ok(arrayed)
}

fn strip_enclosing(value: &str) -> &str {
    let mut chars = value.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

fn half_dwell_sampling(store: &ProcparStore) -> bool {
    store
        .first("f1180")
        .is_some_and(|value| value.contains('y'))
}
