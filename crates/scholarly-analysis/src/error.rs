//! Error types for the analysis engine.
//!
//! Only structurally invalid input escalates to an error. Conditions such as
//! "fewer than two numeric columns" are reported as degenerate results, and
//! undefined statistics are omitted from the output instead.
//!
//! Errors are serializable so a request-handling layer can forward them as
//! `{ "code": ..., "message": ... }` without further mapping.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis engine.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Text input could not be decoded as UTF-8.
    #[error("Unable to decode text input: {0}. Please ensure it's UTF-8 encoded.")]
    Decoding(String),

    /// Columns of a dataset disagree on row count.
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Two columns share the same name.
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Input exceeds the configured size bound.
    #[error("Input too large: {size} {unit} exceeds the limit of {limit}")]
    InputTooLarge {
        size: usize,
        limit: usize,
        unit: &'static str,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The analysis kind needs a different input shape (text vs. table).
    #[error("Analysis '{0}' does not accept this input")]
    UnsupportedInput(String),

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
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for callers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decoding(_) => "DECODING_ERROR",
            Self::ColumnLengthMismatch { .. } => "COLUMN_LENGTH_MISMATCH",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InputTooLarge { .. } => "INPUT_TOO_LARGE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedInput(_) => "UNSUPPORTED_INPUT",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if the caller can fix this error by changing the input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Decoding(_)
            | Self::InputTooLarge { .. }
            | Self::InvalidConfig(_)
            | Self::UnsupportedInput(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

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
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::Decoding("bad byte".to_string()).error_code(),
            "DECODING_ERROR"
        );
        assert_eq!(
            AnalysisError::DuplicateColumn("age".to_string()).error_code(),
            "DUPLICATE_COLUMN"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(AnalysisError::Decoding("x".to_string()).is_recoverable());
        assert!(
            AnalysisError::InputTooLarge {
                size: 10,
                limit: 5,
                unit: "bytes"
            }
            .is_recoverable()
        );
        assert!(!AnalysisError::ColumnNotFound("x".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let error = AnalysisError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error = AnalysisError::DuplicateColumn("score".to_string())
            .with_context("While converting DataFrame");
        assert!(error.to_string().contains("While converting DataFrame"));
        assert_eq!(error.error_code(), "DUPLICATE_COLUMN");
    }

    #[test]
    fn test_decoding_message_mentions_utf8() {
        let error = AnalysisError::Decoding("invalid utf-8 sequence".to_string());
        assert!(error.to_string().contains("UTF-8"));
    }
}
