//! Error types for the Spanner MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error handling.
//! Each error variant carries an actionable message so that AI assistants can
//! understand and recover from failures reported by the tool layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpannerError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Spanner API error in {operation}: {message}")]
    Api {
        operation: String,
        message: String,
        /// gRPC/HTTP status name, e.g. "NOT_FOUND"
        code: Option<String>,
        suggestion: String,
    },

    #[error("Timeout: {operation} exceeded {elapsed_secs}s")]
    Timeout {
        operation: String,
        elapsed_secs: u64,
    },

    #[error("Failed to process query plan: {message}")]
    PlanProcessing { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SpannerError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an API error with an optional status code.
    pub fn api(
        operation: impl Into<String>,
        message: impl Into<String>,
        code: Option<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Api {
            operation: operation.into(),
            message: message.into(),
            code,
            suggestion: suggestion.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>, elapsed_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            elapsed_secs,
        }
    }

    pub fn plan_processing(message: impl Into<String>) -> Self {
        Self::PlanProcessing {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Api { suggestion, .. } => Some(suggestion),
            Self::Timeout { .. } => {
                Some("Consider increasing the timeout or simplifying the request")
            }
            _ => None,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Api { code, .. } => matches!(
                code.as_deref(),
                Some("UNAVAILABLE") | Some("DEADLINE_EXCEEDED") | Some("ABORTED")
            ),
            _ => false,
        }
    }
}

impl From<prost::DecodeError> for SpannerError {
    fn from(err: prost::DecodeError) -> Self {
        SpannerError::decode(format!("invalid proto descriptors: {}", err))
    }
}

impl From<serde_json::Error> for SpannerError {
    fn from(err: serde_json::Error) -> Self {
        SpannerError::internal(format!("JSON serialization failed: {}", err))
    }
}

/// Result type alias for Spanner operations.
pub type SpannerResult<T> = Result<T, SpannerError>;

/// Build suggestion data as JSON value.
fn suggestion_data(suggestion: Option<&str>) -> Option<serde_json::Value> {
    suggestion.map(|s| serde_json::json!({ "suggestion": s }))
}

/// Convert SpannerError to MCP ErrorData for semantic error categorization.
/// Includes the suggestion field in the `data` object when available.
impl From<SpannerError> for rmcp::ErrorData {
    fn from(err: SpannerError) -> Self {
        match &err {
            SpannerError::InvalidInput { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), suggestion_data(err.suggestion()))
            }

            // API errors carry the status code in the message
            SpannerError::Api {
                code: Some(code),
                suggestion,
                ..
            } => rmcp::ErrorData::internal_error(
                format!("{} (status: {})", err, code),
                suggestion_data(Some(suggestion)),
            ),

            SpannerError::Api { .. }
            | SpannerError::Timeout { .. }
            | SpannerError::PlanProcessing { .. }
            | SpannerError::Decode { .. }
            | SpannerError::Internal { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), suggestion_data(err.suggestion()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpannerError::api(
            "GetDatabaseDdl",
            "database not found",
            Some("NOT_FOUND".to_string()),
            "Check the database id",
        );
        assert_eq!(
            err.to_string(),
            "Spanner API error in GetDatabaseDdl: database not found"
        );
    }

    #[test]
    fn test_error_suggestion() {
        let err = SpannerError::api("AnalyzeQuery", "syntax error", None, "Check the SQL");
        assert_eq!(err.suggestion(), Some("Check the SQL"));
        assert!(SpannerError::invalid_input("x").suggestion().is_none());
    }

    #[test]
    fn test_error_retryable() {
        assert!(SpannerError::timeout("AnalyzeQuery", 30).is_retryable());
        assert!(
            SpannerError::api("x", "y", Some("UNAVAILABLE".to_string()), "z").is_retryable()
        );
        assert!(!SpannerError::api("x", "y", Some("NOT_FOUND".to_string()), "z").is_retryable());
        assert!(!SpannerError::invalid_input("bad").is_retryable());
    }

    #[test]
    fn test_invalid_input_maps_to_invalid_params() {
        let mcp_err: rmcp::ErrorData = SpannerError::invalid_input("bad input").into();
        // invalid_params uses -32602
        assert_eq!(mcp_err.code.0, -32602);
    }

    #[test]
    fn test_timeout_maps_to_internal_error() {
        let mcp_err: rmcp::ErrorData = SpannerError::timeout("UpdateDatabaseDdl", 600).into();
        // internal_error uses -32603
        assert_eq!(mcp_err.code.0, -32603);
        assert!(mcp_err.data.is_some());
    }

    #[test]
    fn test_api_error_includes_status_and_suggestion() {
        let err = SpannerError::api(
            "AnalyzeQuery",
            "Table not found: Singers",
            Some("INVALID_ARGUMENT".to_string()),
            "Check the referenced tables",
        );
        let mcp_err: rmcp::ErrorData = err.into();
        assert_eq!(mcp_err.code.0, -32603);
        assert!(mcp_err.message.contains("INVALID_ARGUMENT"));
        let data = mcp_err.data.unwrap();
        assert_eq!(data["suggestion"], "Check the referenced tables");
    }

    #[test]
    fn test_decode_error_conversion() {
        let err = <prost_types::FileDescriptorSet as prost::Message>::decode(&[0xffu8][..])
            .map(|_| ())
            .map_err(SpannerError::from)
            .unwrap_err();
        assert!(matches!(err, SpannerError::Decode { .. }));
    }
}
