//! Domain error types.

/// Top-level error type for coinscope.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("computation failed: {reason}")]
    Computation { reason: String },

    #[error("market data error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn data_source(reason: impl Into<String>) -> Self {
        Self::DataSource {
            reason: reason.into(),
        }
    }

    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&AnalysisError> for std::process::ExitCode {
    fn from(err: &AnalysisError) -> Self {
        let code: u8 = match err {
            AnalysisError::Io(_) => 1,
            AnalysisError::ConfigParse { .. } | AnalysisError::ConfigInvalid { .. } => 2,
            AnalysisError::DataSource { .. } => 3,
            AnalysisError::InvalidInput { .. } | AnalysisError::Computation { .. } => 4,
            AnalysisError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
