pub mod errors;

pub use errors::{PipeError, PipeErrorCategory, PipeResult};

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Nuclei the generator can reference a spectral axis against. Keeping this
/// closed makes an unknown nucleus unrepresentable instead of a runtime
/// contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Nucleus {
    Hydrogen,
    Nitrogen,
    Carbon,
}

impl Nucleus {
    /// IUPAC-recommended chemical-shift referencing ratio relative to 1H.
    ///
    /// Wishart DS et al., J Biomol NMR. 1995 Sep;6(2):135-40. PMID 8589602.
    pub const fn referencing_ratio(self) -> f64 {
        match self {
            Self::Hydrogen => 1.0,
            Self::Nitrogen => 0.101329118,
            Self::Carbon => 0.251449530,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hydrogen => "H",
            Self::Nitrogen => "N",
            Self::Carbon => "C",
        }
    }
}

impl Display for Nucleus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// A ppm interval for direct-dimension extraction, normalized so that
/// `upper` is always the numeric maximum of the two input bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtractRange {
    lower: f64,
    upper: f64,
}

impl ExtractRange {
    pub fn new(first_bound: f64, second_bound: f64) -> Self {
        Self {
            lower: first_bound.min(second_bound),
            upper: first_bound.max(second_bound),
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

/// Explicit per-run configuration. The original tool kept most of this as
/// mutable object state; here it is assembled once by the caller and passed
/// through the pipeline unchanged.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// Directory holding the raw data and the parameter file.
    pub data_dir: PathBuf,
    /// Base name for derived artifacts, conventionally the working
    /// directory's base name.
    pub spectrum_name: String,
    /// Raw time-domain input file name inside `data_dir`.
    pub fid_name: String,
    /// Generated script file name inside `data_dir`.
    pub script_name: String,
    /// Second-dimension nucleus selection.
    pub second_dimension: Nucleus,
    /// Measurement temperature override in Celsius; `None` trusts the
    /// parameter file.
    pub temperature_override: Option<f64>,
    /// Skip linear prediction in the indirect dimension.
    pub fast_process: bool,
    /// Explicit direct-dimension extraction window.
    pub extract: Option<ExtractRange>,
    /// Zero-order proton phase delta as supplied by the user; tolerated
    /// non-numeric.
    pub user_phase: String,
}

pub const DEFAULT_PROCPAR_NAME: &str = "procpar";
pub const DEFAULT_FID_NAME: &str = "fid";
pub const DEFAULT_SCRIPT_NAME: &str = "convert_nmr.com";

impl ConvertRequest {
    pub fn new(data_dir: impl Into<PathBuf>, spectrum_name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            spectrum_name: spectrum_name.into(),
            fid_name: DEFAULT_FID_NAME.to_string(),
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            second_dimension: Nucleus::Nitrogen,
            temperature_override: None,
            fast_process: false,
            extract: None,
            user_phase: "0.0".to_string(),
        }
    }

    pub fn script_path(&self) -> PathBuf {
        self.data_dir.join(&self.script_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConvertRequest, ExtractRange, Nucleus};

    #[test]
    fn extract_range_orders_bounds_regardless_of_input_order() {
        let forward = ExtractRange::new(6.8, 10.0);
        let reversed = ExtractRange::new(10.0, 6.8);
        assert_eq!(forward, reversed);
        assert_eq!(forward.lower(), 6.8);
        assert_eq!(forward.upper(), 10.0);
    }

    #[test]
    fn referencing_ratios_match_literature_values() {
        assert_eq!(Nucleus::Hydrogen.referencing_ratio(), 1.0);
        assert_eq!(Nucleus::Nitrogen.referencing_ratio(), 0.101329118);
        assert_eq!(Nucleus::Carbon.referencing_ratio(), 0.251449530);
    }

    #[test]
    fn convert_request_defaults_follow_instrument_conventions() {
        let request = ConvertRequest::new(".", "hsqc_298K");
        assert_eq!(request.fid_name, "fid");
        assert_eq!(request.script_name, "convert_nmr.com");
        assert_eq!(request.second_dimension, Nucleus::Nitrogen);
        assert_eq!(request.script_path(), std::path::Path::new("./convert_nmr.com"));
    }
}
