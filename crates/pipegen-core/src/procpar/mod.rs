//! Varian/Agilent `procpar` parameter file parsing and lookup.
//!
//! The file is a sequence of per-parameter blocks; values are kept as the
//! raw strings the instrument wrote, ordered as they appeared. The store is
//! built once per run and never mutated afterwards.

mod parser;

use crate::domain::{PipeError, PipeResult};
use parser::BlockLayout;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcparStore {
    parameters: HashMap<String, Vec<String>>,
}

impl ProcparStore {
    /// Reads and parses a parameter file. An unreadable file is a hard
    /// stop: nothing downstream can proceed without it.
    pub fn from_file(path: &Path) -> PipeResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| {
            PipeError::io_system(
                "IO.PROCPAR_READ",
                format!(
                    "failed to open parameter file '{}': {}; please check it",
                    path.display(),
                    source
                ),
            )
        })?;
        Self::from_source(&source)
    }

    pub fn from_source(source: &str) -> PipeResult<Self> {
        Ok(Self {
            parameters: parser::parse_source(source)?,
        })
    }

    /// Ordered value sequence of a parameter, or `None` when the name was
    /// not present in the file. Absence is left to the caller to judge.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.parameters.get(name).map(Vec::as_slice)
    }

    /// First stored value of a parameter, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).and_then(|values| values.first()).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> PipeResult<&[String]> {
        self.values(name).ok_or_else(|| missing_parameter(name))
    }

    pub fn require_first(&self, name: &str) -> PipeResult<&str> {
        self.first(name).ok_or_else(|| missing_parameter(name))
    }

    pub fn require_first_f64(&self, name: &str) -> PipeResult<f64> {
        let value = self.require_first(name)?;
        value.parse::<f64>().map_err(|_| non_numeric_parameter(name, value))
    }

    pub fn require_first_i64(&self, name: &str) -> PipeResult<i64> {
        let value = self.require_first(name)?;
        value.parse::<i64>().map_err(|_| non_numeric_parameter(name, value))
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Re-serializes the store into well-formed block text. Parsing the
    /// rendered text yields the same mapping; parameter order is
    /// name-sorted for determinism.
    pub fn render(&self) -> String {
        let mut names: Vec<&String> = self.parameters.keys().collect();
        names.sort();

        let mut rendered = String::new();
        for name in names {
            let values = &self.parameters[name];
            match BlockLayout::for_parameter(name) {
                BlockLayout::FixedStride => {
                    let value = values.first().map(String::as_str).unwrap_or("");
                    rendered.push_str(name);
                    rendered.push('\n');
                    rendered.push_str("1 ");
                    rendered.push_str(value);
                    rendered.push('\n');
                    rendered.push_str("0\n");
                }
                BlockLayout::CountedList => {
                    rendered.push_str(name);
                    rendered.push('\n');
                    rendered.push_str(&values.len().to_string());
                    rendered.push('\n');
                    for value in values {
                        rendered.push_str(value);
                        rendered.push('\n');
                    }
                    rendered.push_str("0\n");
                }
            }
        }
        rendered
    }
}

fn missing_parameter(name: &str) -> PipeError {
    PipeError::input_validation(
        "INPUT.PARAMETER_MISSING",
        format!("no parameter like '{name}' in the procpar file"),
    )
}

fn non_numeric_parameter(name: &str, value: &str) -> PipeError {
    PipeError::input_validation(
        "INPUT.PARAMETER_NUMERIC",
        format!("parameter '{name}' value '{value}' is not numeric"),
    )
}

#[cfg(test)]
mod tests {
    use super::ProcparStore;
    use std::path::Path;
    use tempfile::TempDir;

    fn sample_store() -> ProcparStore {
        let source = "\
np 7 1
1 2048
0
sw 7 1
1 7200.1201
0
dgs 2
3 ACQUISITION
SAMPLE
DISPLAY
0
tn 2 1
1 \"H1\"
0
";
        ProcparStore::from_source(source).expect("sample source should parse")
    }

    #[test]
    fn lookups_return_stored_value_sequences() {
        let store = sample_store();
        assert_eq!(store.first("np"), Some("2048"));
        assert_eq!(store.first("tn"), Some("\"H1\""));
        assert_eq!(
            store.values("dgs"),
            Some(
                &[
                    "ACQUISITION".to_string(),
                    "SAMPLE".to_string(),
                    "DISPLAY".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn absent_parameters_yield_none_not_a_panic() {
        let store = sample_store();
        assert_eq!(store.values("ni"), None);
        assert_eq!(store.first("ni"), None);
        let error = store.require("ni").expect_err("ni should be absent");
        assert_eq!(error.placeholder(), "INPUT.PARAMETER_MISSING");
    }

    #[test]
    fn numeric_helpers_parse_and_reject() {
        let store = sample_store();
        assert_eq!(store.require_first_i64("np").expect("np is numeric"), 2048);
        assert!((store.require_first_f64("sw").expect("sw is numeric") - 7200.1201).abs() < 1e-9);
        let error = store
            .require_first_f64("tn")
            .expect_err("tn is not numeric");
        assert_eq!(error.placeholder(), "INPUT.PARAMETER_NUMERIC");
    }

    #[test]
    fn render_then_parse_is_identity_on_the_mapping() {
        let store = sample_store();
        let reparsed =
            ProcparStore::from_source(&store.render()).expect("rendered text should parse");
        assert_eq!(store, reparsed);
    }

    #[test]
    fn unreadable_file_is_a_fatal_io_error_naming_the_path() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("procpar");
        let error = ProcparStore::from_file(&path).expect_err("missing file should fail");
        assert_eq!(error.placeholder(), "IO.PROCPAR_READ");
        assert!(error.message().contains("procpar"));
        assert!(error.fatal_exit_line().is_some());
    }

    #[test]
    fn from_file_reads_a_real_file() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("procpar");
        std::fs::write(&path, "np 7 1\n1 1024\n0\n").expect("fixture should be written");
        let store = ProcparStore::from_file(Path::new(&path)).expect("file should parse");
        assert_eq!(store.first("np"), Some("1024"));
        assert_eq!(store.len(), 1);
    }
}
