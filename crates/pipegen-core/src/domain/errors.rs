use std::fmt::{Display, Formatter};

pub type PipeResult<T> = Result<T, PipeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeErrorCategory {
    InputValidation,
    IoSystem,
    ComputationError,
    Internal,
}

impl PipeErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "INPUT",
            Self::IoSystem => "IO",
            Self::ComputationError => "RUN",
            Self::Internal => "SYS",
        }
    }

    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidation => 2,
            Self::IoSystem => 3,
            Self::ComputationError => 4,
            Self::Internal => 5,
        }
    }
}

impl Display for PipeErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorized error with a stable placeholder code, shared by every parser
/// and composer in the crate.
#[derive(Debug, Clone, thiserror::Error)]
#[error("[{placeholder}] {message}")]
pub struct PipeError {
    category: PipeErrorCategory,
    placeholder: String,
    message: String,
}

impl PipeError {
    pub fn input_validation(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_category(PipeErrorCategory::InputValidation, placeholder, message)
    }

    pub fn io_system(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_category(PipeErrorCategory::IoSystem, placeholder, message)
    }

    pub fn computation(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_category(PipeErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_category(PipeErrorCategory::Internal, placeholder, message)
    }

    fn with_category(
        category: PipeErrorCategory,
        placeholder: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder: placeholder.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> PipeErrorCategory {
        self.category
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: {}", self)
    }

    /// Extra closing line printed for hard-stop failures; absent for the
    /// categories that let the caller decide how to proceed.
    pub fn fatal_exit_line(&self) -> Option<String> {
        match self.category {
            PipeErrorCategory::IoSystem | PipeErrorCategory::Internal => Some(format!(
                "nmrpipegen aborted (exit code {}).",
                self.exit_code()
            )),
            PipeErrorCategory::InputValidation | PipeErrorCategory::ComputationError => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PipeError, PipeErrorCategory};

    #[test]
    fn categories_map_to_stable_exit_codes() {
        assert_eq!(PipeErrorCategory::InputValidation.exit_code(), 2);
        assert_eq!(PipeErrorCategory::IoSystem.exit_code(), 3);
        assert_eq!(PipeErrorCategory::ComputationError.exit_code(), 4);
        assert_eq!(PipeErrorCategory::Internal.exit_code(), 5);
    }

    #[test]
    fn diagnostic_line_carries_placeholder_and_message() {
        let error = PipeError::io_system("IO.PROCPAR_READ", "failed to open 'procpar'");
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [IO.PROCPAR_READ] failed to open 'procpar'"
        );
        assert_eq!(error.placeholder(), "IO.PROCPAR_READ");
        assert_eq!(error.category(), PipeErrorCategory::IoSystem);
    }

    #[test]
    fn only_hard_stop_categories_emit_a_fatal_exit_line() {
        assert!(
            PipeError::io_system("IO.X", "boom")
                .fatal_exit_line()
                .is_some()
        );
        assert!(
            PipeError::input_validation("INPUT.X", "bad")
                .fatal_exit_line()
                .is_none()
        );
    }
}
