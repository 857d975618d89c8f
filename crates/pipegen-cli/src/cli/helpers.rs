use super::CliError;
use anyhow::Context;
use pipegen_core::compose::RunReport;
use pipegen_core::domain::{ExtractRange, PipeError};
use std::fs;
use std::path::Path;

/// Base name for derived artifacts: the canonicalized data directory's
/// final component.
pub(super) fn spectrum_base_name(dir: &Path) -> Result<String, CliError> {
    let canonical = dir.canonicalize().map_err(|source| {
        CliError::Compute(PipeError::io_system(
            "IO.DATA_DIR",
            format!("cannot resolve data directory '{}': {source}", dir.display()),
        ))
    })?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CliError::Compute(PipeError::input_validation(
                "INPUT.DATA_DIR_NAME",
                format!("data directory '{}' has no base name", dir.display()),
            ))
        })
}

/// Parses a `LOW,HIGH` ppm window. Surrounding brackets are tolerated so a
/// pasted `[6.8, 10.0]` works as-is.
pub(super) fn parse_extract(window: &str) -> Result<ExtractRange, CliError> {
    let trimmed = window.trim().trim_start_matches('[').trim_end_matches(']');
    let bounds: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if bounds.len() == 2
        && let (Ok(first), Ok(second)) = (bounds[0].parse::<f64>(), bounds[1].parse::<f64>())
    {
        return Ok(ExtractRange::new(first, second));
    }
    Err(CliError::Usage(format!(
        "invalid --extract window '{window}': expected two comma-separated ppm values"
    )))
}

pub(super) fn write_script(path: &Path, script: &str) -> Result<(), CliError> {
    fs::write(path, script).map_err(|source| {
        CliError::Compute(PipeError::io_system(
            "IO.SCRIPT_WRITE",
            format!("could not write script '{}': {source}", path.display()),
        ))
    })
}

pub(super) fn write_report(path: &Path, report: &RunReport) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory '{}'", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(report).context("serializing run report")?;
    fs::write(path, body).with_context(|| format!("writing report '{}'", path.display()))?;
    Ok(())
}

pub(super) fn temperature_banner(temperature_celsius: f64) -> String {
    format!(
        "{line}\n>>>>>>>>>> PLEASE MAKE SURE THAT YOU MEASURED @ {temperature_celsius} C! <<<<<<<<<<\n{line}",
        line = "-".repeat(70),
    )
}
