//! Error types for the cleaning pipeline.
//!
//! Every pipeline operation returns [`Result`]. Errors are serializable so the
//! UI layer embedding the pipeline can forward them as `{ code, message }`
//! payloads without matching on variants itself.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;
use crate::types::SemanticType;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Input is empty, not UTF-8, has no header row, or is not well-formed
    /// delimited text.
    #[error("Failed to parse delimited text: {0}")]
    Parse(String),

    /// Operation invoked against a column of the wrong semantic type.
    #[error("Column '{column}' is {found}, expected {expected}")]
    Type {
        column: String,
        expected: &'static str,
        found: SemanticType,
    },

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Uploaded content exceeds the configured size limit.
    #[error("Input of {size} bytes exceeds the limit of {max_size} bytes")]
    InputTooLarge { size: u64, max_size: u64 },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExplorerError>,
    },
}

impl ExplorerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExplorerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for the UI layer.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "PARSE_ERROR",
            Self::Type { .. } => "TYPE_ERROR",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InputTooLarge { .. } => "INPUT_TOO_LARGE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the user can fix this by changing the upload or the selection,
    /// as opposed to an internal failure.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Parse(_)
            | Self::Type { .. }
            | Self::ColumnNotFound(_)
            | Self::InputTooLarge { .. }
            | Self::InvalidConfig(_) => true,
            Self::Polars(_) => false,
            Self::WithContext { source, .. } => source.is_user_error(),
        }
    }
}

impl From<ConfigValidationError> for ExplorerError {
    fn from(err: ConfigValidationError) -> Self {
        ExplorerError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ExplorerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ExplorerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ExplorerError::Polars(e).with_context(context))
    }
}
