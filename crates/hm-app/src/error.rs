//! Error types for the hm-app service layer.

use hm_core::BuildErrorKind;
use std::path::PathBuf;

/// Application error that wraps the domain errors of every pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{kind} error: {message}")]
    Build {
        kind: BuildErrorKind,
        message: String,
    },

    /// A build failed with validation skipped, and the validation run that
    /// followed found problems with the description.
    #[error("{kind} error: {message} (description also failed validation: {})", .validation.join("; "))]
    BuildInvalid {
        kind: BuildErrorKind,
        message: String,
        validation: Vec<String>,
    },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Failed to read input file: {path}")]
    InputFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hm-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build error category, when the failure is one.
    pub fn kind(&self) -> Option<BuildErrorKind> {
        match self {
            AppError::Build { kind, .. } | AppError::BuildInvalid { kind, .. } => Some(*kind),
            AppError::Validation(_) => Some(BuildErrorKind::StructuralValidation),
            _ => None,
        }
    }
}

// Conversions from backend error types
impl From<hm_input::ValidationErrors> for AppError {
    fn from(err: hm_input::ValidationErrors) -> Self {
        AppError::Validation(err.messages())
    }
}

impl From<hm_input::InputError> for AppError {
    fn from(err: hm_input::InputError) -> Self {
        match err {
            hm_input::InputError::Validation(errors) => errors.into(),
            other => AppError::Input(other.to_string()),
        }
    }
}

impl From<hm_model::ModelError> for AppError {
    fn from(err: hm_model::ModelError) -> Self {
        AppError::Build {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<hm_envelope::EnvelopeError> for AppError {
    fn from(err: hm_envelope::EnvelopeError) -> Self {
        AppError::Build {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<hm_hvac::HvacError> for AppError {
    fn from(err: hm_hvac::HvacError) -> Self {
        AppError::Build {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<hm_output::OutputError> for AppError {
    fn from(err: hm_output::OutputError) -> Self {
        AppError::Output(err.to_string())
    }
}
