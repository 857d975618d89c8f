//! Script composition: turns a parameter store, the recovered phase state,
//! and the run configuration into one rendered pipeline script plus the
//! derived artifact names.

mod templates;

use crate::domain::{ConvertRequest, Nucleus, PipeResult};
use crate::experiment::{self, ExperimentLayout, ExperimentShape};
use crate::phase::{PhaseAdjustment, PhaseState, phase_stage_line};
use crate::procpar::ProcparStore;
use crate::referencing;
use serde::Serialize;
use std::path::PathBuf;

/// Subdirectory holding the per-plane split of a multi-FID experiment.
pub const PLANE_SUBDIRECTORY: &str = "data";

/// Values substituted into one spectral axis of the conversion stage.
#[derive(Debug, Clone)]
struct AxisFields {
    points: String,
    time_points: String,
    mode: String,
    sweep_width: String,
    observe: String,
    carrier: String,
    label: String,
}

/// Marker substituted immediately before an optional pipeline stage: an
/// empty string keeps the stage active, a comment marker disables it while
/// leaving it visible in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageToggle {
    Enabled,
    Disabled,
}

impl StageToggle {
    fn from_flag(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    fn marker(self) -> &'static str {
        match self {
            Self::Enabled => "",
            Self::Disabled => "#",
        }
    }
}

/// The complete, explicitly named substitution record for one script.
/// Every placeholder a template consumes has a field here; nothing is
/// looked up by string key.
#[derive(Debug, Clone)]
struct ScriptFields {
    fid_file: String,
    ndim: String,
    aq2d: String,
    output_file: String,
    processed_file: String,
    direct_phase_line: String,
    indirect_phase_line: String,
    window_scale: String,
    linear_prediction: StageToggle,
    extraction: StageToggle,
    extraction_region: String,
    reversal: StageToggle,
}

/// Names of the artifacts the generated script and its follow-up steps
/// produce. Pseudo-3D experiments use numbered printf-style patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputArtifacts {
    pub intermediate_fid: PathBuf,
    pub processed_spectrum: PathBuf,
    pub visualization: PathBuf,
    pub plane_dir: Option<PathBuf>,
    pub plane_count: usize,
}

#[derive(Debug, Clone)]
pub struct ComposedScript {
    pub script: String,
    pub shape: ExperimentShape,
    /// Phase state after applying the user delta; what the script renders
    /// for the direct dimension.
    pub phase: PhaseState,
    pub adjustment: Option<PhaseAdjustment>,
    pub temperature_celsius: f64,
    pub proton_carrier_ppm: f64,
    pub indirect_carrier_ppm: Option<f64>,
    pub artifacts: OutputArtifacts,
}

/// Composes the pipeline script. `prior_phase` must be recovered from any
/// previously generated script *before* the caller overwrites it.
pub fn compose(
    store: &ProcparStore,
    prior_phase: PhaseState,
    request: &ConvertRequest,
) -> PipeResult<ComposedScript> {
    let shape = experiment::classify(store, request)?;

    let mut phase = prior_phase;
    let adjustment = phase.apply_user_delta(&request.user_phase);

    let temperature = match request.temperature_override {
        Some(value) => value,
        None => store.require_first_f64("temp")?,
    };
    let proton_carrier = referencing::water_proton_shift_ppm(temperature);

    let proton_frequency = store.require_first_f64("sfrq")?;
    let direct = AxisFields {
        points: store.require_first("np")?.to_string(),
        time_points: (store.require_first_i64("np")? / 2).to_string(),
        mode: "Complex".to_string(),
        sweep_width: format_fixed_f64(store.require_first_f64("sw")?, 10, 4),
        observe: format_fixed_f64(proton_frequency, 10, 6),
        carrier: format_fixed_f64(proton_carrier, 9, 8),
        label: store.require_first("tn")?.to_string(),
    };

    let extraction_region = match shape.extract {
        Some(range) => format!(
            "-x1 {upper:3.1}ppm -xn {lower:3.1}ppm -sw -round 16",
            upper = range.upper(),
            lower = range.lower(),
        ),
        None => "-left -sw".to_string(),
    };

    let mut fields = ScriptFields {
        fid_file: request.data_dir.join(&request.fid_name).display().to_string(),
        ndim: "2".to_string(),
        aq2d: "States".to_string(),
        output_file: String::new(),
        processed_file: String::new(),
        direct_phase_line: phase_stage_line(phase.direct_zero_order, phase.direct_first_order),
        indirect_phase_line: phase_stage_line(
            shape.indirect_window.zero_order,
            shape.indirect_window.first_order,
        ),
        window_scale: format!("{:3.1}", shape.indirect_window.scale),
        linear_prediction: StageToggle::from_flag(!shape.fast_process),
        extraction: StageToggle::from_flag(shape.extract.is_some()),
        extraction_region,
        reversal: StageToggle::from_flag(shape.trosy),
    };

    let base = &request.spectrum_name;
    let mut indirect_carrier = None;

    let (script, artifacts) = match &shape.layout {
        ExperimentLayout::OneDimensional => {
            fields.ndim = "1".to_string();
            fields.output_file = request.data_dir.join(format!("{base}.fid")).display().to_string();
            fields.processed_file =
                request.data_dir.join(format!("{base}.dat")).display().to_string();
            let artifacts = single_file_artifacts(request);
            (templates::one_dimensional(&fields, &direct), artifacts)
        }
        ExperimentLayout::TwoDimensional => {
            let indirect = indirect_axis(
                store,
                request.second_dimension,
                proton_carrier,
                proton_frequency,
                &mut indirect_carrier,
            )?;
            fields.output_file = request.data_dir.join(format!("{base}.fid")).display().to_string();
            fields.processed_file =
                request.data_dir.join(format!("{base}.dat")).display().to_string();
            let artifacts = single_file_artifacts(request);
            (
                templates::two_dimensional(&fields, &direct, &indirect),
                artifacts,
            )
        }
        ExperimentLayout::PseudoThreeDimensional { plane_count, .. } => {
            let indirect = indirect_axis(
                store,
                request.second_dimension,
                proton_carrier,
                proton_frequency,
                &mut indirect_carrier,
            )?;
            let pseudo = pseudo_axis(*plane_count);
            fields.ndim = "3".to_string();

            let plane_dir = request.data_dir.join(PLANE_SUBDIRECTORY);
            let intermediate = plane_dir.join(format!("{base}_%03d.fid"));
            let processed = request.data_dir.join(format!("{base}_%01d.dat"));
            fields.output_file = intermediate.display().to_string();
            fields.processed_file = processed.display().to_string();

            let artifacts = OutputArtifacts {
                intermediate_fid: intermediate,
                processed_spectrum: processed,
                visualization: request.data_dir.join(format!("{base}_%01d.ucsf")),
                plane_dir: Some(plane_dir),
                plane_count: *plane_count,
            };
            (
                templates::pseudo_three_dimensional(&fields, &direct, &pseudo, &indirect),
                artifacts,
            )
        }
    };

    Ok(ComposedScript {
        script,
        shape,
        phase,
        adjustment,
        temperature_celsius: temperature,
        proton_carrier_ppm: proton_carrier,
        indirect_carrier_ppm: indirect_carrier,
        artifacts,
    })
}

fn single_file_artifacts(request: &ConvertRequest) -> OutputArtifacts {
    let base = &request.spectrum_name;
    OutputArtifacts {
        intermediate_fid: request.data_dir.join(format!("{base}.fid")),
        processed_spectrum: request.data_dir.join(format!("{base}.dat")),
        visualization: request.data_dir.join(format!("{base}.ucsf")),
        plane_dir: None,
        plane_count: 1,
    }
}

fn indirect_axis(
    store: &ProcparStore,
    nucleus: Nucleus,
    proton_carrier: f64,
    proton_frequency: f64,
    carrier_out: &mut Option<f64>,
) -> PipeResult<AxisFields> {
    let (sweep_name, frequency_name, label_name) =
        experiment::second_dimension_parameters(nucleus);

    let points = store.require_first_i64("ni")?;
    let observe = store.require_first_f64(frequency_name)?;
    let carrier = referencing::carrier_ppm(proton_carrier, proton_frequency, observe, nucleus);
    *carrier_out = Some(carrier);

    Ok(AxisFields {
        points: (points * 2).to_string(),
        time_points: points.to_string(),
        mode: "Rance-Kay".to_string(),
        sweep_width: format_fixed_f64(store.require_first_f64(sweep_name)?, 10, 4),
        observe: format_fixed_f64(observe, 10, 6),
        carrier: format_fixed_f64(carrier, 9, 6),
        label: store.require_first(label_name)?.to_string(),
    })
}

/// The arrayed pseudo axis is processed as real points on a nominal
/// 10 ppm / 10 MHz grid; only its length matters.
fn pseudo_axis(plane_count: usize) -> AxisFields {
    AxisFields {
        points: plane_count.to_string(),
        time_points: plane_count.to_string(),
        mode: "Real".to_string(),
        sweep_width: "10.000".to_string(),
        observe: "10.000".to_string(),
        carrier: "5.000".to_string(),
        label: "\"Trel\"".to_string(),
    }
}

fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

/// Shell command lines the external runner executes after the script is
/// written: making it executable, running it, fixing pseudo-3D headers,
/// converting to the viewer format, optional display and cleanup. Kept as
/// data; nothing here is executed by this crate.
pub fn post_process_plan(
    composed: &ComposedScript,
    request: &ConvertRequest,
    show_viewer: bool,
    keep_files: bool,
) -> Vec<String> {
    let script_path = request.script_path().display().to_string();
    let result_base = request
        .data_dir
        .join(&request.spectrum_name)
        .display()
        .to_string();

    let mut plan = vec![format!("chmod 755 {script_path}"), script_path.clone()];

    if composed.shape.layout.is_multi_fid() {
        for plane in 1..=composed.artifacts.plane_count {
            // Plane headers claim three dimensions; each extracted plane
            // is really a 2D spectrum.
            plan.push(format!("sethdr {result_base}_{plane}.dat -ndim 2"));
            plan.push(format!(
                "pipe2ucsf {result_base}_{plane}.dat {result_base}_{plane}.ucsf"
            ));
        }
    } else {
        plan.push(format!("pipe2ucsf {result_base}.dat {result_base}.ucsf"));
    }

    if show_viewer {
        plan.push(format!("nmrDraw {result_base}.dat"));
    }

    if !keep_files {
        if let Some(plane_dir) = &composed.artifacts.plane_dir {
            plan.push(format!("rm -rf {}", plane_dir.display()));
        }
        plan.push(format!("rm -f {result_base}*.fid"));
        plan.push(format!("rm -f {result_base}*.dat"));
    }

    plan
}

/// Serializable summary of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub sequence: String,
    pub layout: String,
    pub second_dimension: Nucleus,
    pub temperature_celsius: f64,
    pub proton_carrier_ppm: f64,
    pub indirect_carrier_ppm: Option<f64>,
    pub direct_zero_order_phase: f64,
    pub direct_first_order_phase: f64,
    pub phase_adjustment: Option<PhaseAdjustment>,
    pub script_path: PathBuf,
    pub artifacts: OutputArtifacts,
}

impl RunReport {
    pub fn new(composed: &ComposedScript, request: &ConvertRequest) -> Self {
        Self {
            sequence: composed.shape.sequence.clone(),
            layout: composed.shape.layout.as_str().to_string(),
            second_dimension: composed.shape.second_dimension,
            temperature_celsius: composed.temperature_celsius,
            proton_carrier_ppm: composed.proton_carrier_ppm,
            indirect_carrier_ppm: composed.indirect_carrier_ppm,
            direct_zero_order_phase: composed.phase.direct_zero_order,
            direct_first_order_phase: composed.phase.direct_first_order,
            phase_adjustment: composed.adjustment,
            script_path: request.script_path(),
            artifacts: composed.artifacts.clone(),
        }
    }
}
