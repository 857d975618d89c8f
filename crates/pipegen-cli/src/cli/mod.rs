mod commands;
mod helpers;

use clap::Parser;
use pipegen_core::domain::{Nucleus, PipeError};
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_pipe_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            if let Some(summary_line) = diagnostic.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            diagnostic.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => commands::run_generate(cli),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "nmrpipegen",
    version,
    about = "Generate nmrPipe processing scripts from Varian procpar data"
)]
pub(crate) struct Cli {
    /// Proton zero-order phase delta added to the previous run's value
    #[arg(value_name = "PHASE", default_value = "0.0", allow_hyphen_values = true)]
    pub(crate) phase: String,

    /// Directory holding the fid and parameter files
    #[arg(long, default_value = ".")]
    pub(crate) dir: PathBuf,

    /// Parameter file name inside the data directory
    #[arg(long, default_value = "procpar")]
    pub(crate) procpar: String,

    /// Raw time-domain file name inside the data directory
    #[arg(long, default_value = "fid")]
    pub(crate) fid: String,

    /// Measurement temperature override in Celsius
    #[arg(long, value_name = "CELSIUS")]
    pub(crate) temperature: Option<f64>,

    /// Second-dimension nucleus
    #[arg(long, value_enum, default_value = "nitrogen")]
    pub(crate) second_dimension: SecondDimension,

    /// Skip linear prediction in the indirect dimension
    #[arg(long)]
    pub(crate) fast: bool,

    /// Proton extraction window in ppm, e.g. 6.8,10.0
    #[arg(long, value_name = "LOW,HIGH")]
    pub(crate) extract: Option<String>,

    /// Leave the viewer steps out of the post-processing plan
    #[arg(long)]
    pub(crate) noplot: bool,

    /// Keep intermediate files (no cleanup steps in the plan)
    #[arg(long)]
    pub(crate) nocleanup: bool,

    /// Write a JSON run report
    #[arg(long, value_name = "PATH")]
    pub(crate) report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum SecondDimension {
    Nitrogen,
    Carbon,
}

impl From<SecondDimension> for Nucleus {
    fn from(selection: SecondDimension) -> Self {
        match selection {
            SecondDimension::Nitrogen => Nucleus::Nitrogen,
            SecondDimension::Carbon => Nucleus::Carbon,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(PipeError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_pipe_error(&self) -> PipeError {
        match self {
            Self::Usage(message) => PipeError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => PipeError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}
