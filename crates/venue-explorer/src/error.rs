//! Error types for the venue explorer.
//!
//! Only resource-level failures cross the library boundary as errors. Bad
//! rows are absorbed by the cleaner and surface as counts in the
//! [`CleaningReport`](crate::types::CleaningReport), and a query that matches
//! nothing yields an empty table rather than an error.
//!
//! Errors are serializable so a frontend can display them as `{code, message}`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the venue explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The tabular resource is missing, unreadable, or has no columns.
    #[error("Failed to read data source '{source_name}': {reason}")]
    DataSource { source_name: String, reason: String },

    /// A top-N value outside the offered choices.
    #[error("Invalid top-N value {0} (expected one of 5, 10, 15, 20)")]
    InvalidTopN(u32),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExplorerError>,
    },
}

impl ExplorerError {
    /// Build a [`ExplorerError::DataSource`] from anything displayable.
    pub fn data_source(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ExplorerError::DataSource {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExplorerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataSource { .. } => "DATA_SOURCE_ERROR",
            Self::InvalidTopN(_) => "INVALID_TOP_N",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// True when the error came from the data source rather than the caller.
    pub fn is_data_source(&self) -> bool {
        match self {
            Self::DataSource { .. } => true,
            Self::WithContext { source, .. } => source.is_data_source(),
            _ => false,
        }
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

/// Result type alias for explorer operations.
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
