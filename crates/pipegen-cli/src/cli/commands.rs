use super::helpers::{
    parse_extract, spectrum_base_name, temperature_banner, write_report, write_script,
};
use super::{Cli, CliError};
use pipegen_core::compose::{ComposedScript, RunReport, compose, post_process_plan};
use pipegen_core::domain::ConvertRequest;
use pipegen_core::phase::{PhaseState, format_phase};
use pipegen_core::procpar::ProcparStore;
use std::fs;

pub(super) fn run_generate(cli: Cli) -> Result<i32, CliError> {
    let spectrum_name = spectrum_base_name(&cli.dir)?;

    let mut request = ConvertRequest::new(cli.dir.clone(), spectrum_name);
    request.fid_name = cli.fid.clone();
    request.second_dimension = cli.second_dimension.into();
    request.temperature_override = cli.temperature;
    request.fast_process = cli.fast;
    request.user_phase = cli.phase.clone();
    if let Some(window) = &cli.extract {
        request.extract = Some(parse_extract(window)?);
    }

    let procpar_path = request.data_dir.join(&cli.procpar);
    tracing::debug!(path = %procpar_path.display(), "loading parameter file");
    let store = ProcparStore::from_file(&procpar_path).map_err(CliError::Compute)?;

    // Phase state must be recovered before the script is overwritten below.
    let prior_phase = PhaseState::from_script_file(&request.script_path());

    let composed = compose(&store, prior_phase, &request).map_err(CliError::Compute)?;
    tracing::debug!(
        layout = composed.shape.layout.as_str(),
        planes = composed.artifacts.plane_count,
        "composed processing script"
    );

    println!("{} pulse sequence was used", composed.shape.sequence);
    if let Some(plane_dir) = &composed.artifacts.plane_dir {
        println!(
            "NOTE: arrayed acquisition; planes are split into {}/",
            plane_dir.display()
        );
        fs::create_dir_all(plane_dir).map_err(|source| {
            CliError::Compute(pipegen_core::domain::PipeError::io_system(
                "IO.PLANE_DIR_CREATE",
                format!(
                    "could not create plane directory '{}': {source}",
                    plane_dir.display()
                ),
            ))
        })?;
    }

    print_phase_summary(&composed, &request.user_phase);

    write_script(&request.script_path(), &composed.script)?;

    println!("The script utilized to process the data:");
    println!("{}", composed.script);

    println!("Follow-up steps:");
    for step in post_process_plan(&composed, &request, !cli.noplot, cli.nocleanup) {
        println!("  {step}");
    }

    if let Some(report_path) = &cli.report {
        let report = RunReport::new(&composed, &request);
        write_report(report_path, &report)?;
        println!("JSON report: {}", report_path.display());
    }

    eprintln!("{}", temperature_banner(composed.temperature_celsius));

    Ok(0)
}

fn print_phase_summary(composed: &ComposedScript, user_phase: &str) {
    println!("{}", "-".repeat(60));
    match composed.adjustment {
        // The delta is echoed back exactly as the user typed it.
        Some(adjustment) => println!(
            "The value for p0 phase correction is {} + ({}) = {}",
            format_phase(adjustment.previous),
            user_phase,
            format_phase(adjustment.combined),
        ),
        None => println!(
            "The value for p0 phase correction is {}",
            format_phase(composed.phase.direct_zero_order),
        ),
    }
    println!("{}", "-".repeat(60));
}
