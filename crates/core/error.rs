//! Error types for the listing query engine.

use staymap_types::BoundsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StaymapError>;

/// Broad class of an error, used by transports to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input; never retried.
    Validation,
    /// Unknown reference or no admissible result.
    NotFound,
    /// Anything else. Never reported as an empty result.
    Internal,
}

#[derive(Debug, Error)]
pub enum StaymapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Index inconsistency: {0}")]
    Index(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StaymapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::MissingParameter(_) | Self::InvalidParameter { .. } => {
                ErrorKind::Validation
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Dataset(_) | Self::Config(_) | Self::Index(_) | Self::Io(_) | Self::Json(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Name of the offending parameter, when the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingParameter(field) | Self::InvalidParameter { field, .. } => Some(*field),
            _ => None,
        }
    }

    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

impl From<BoundsError> for StaymapError {
    fn from(err: BoundsError) -> Self {
        Self::InvalidParameter {
            field: err.field(),
            reason: err.to_string(),
        }
    }
}
