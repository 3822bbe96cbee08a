//! Error types for paydesk-core
//!
//! Fetch and update failures are recovered locally: they are reported
//! through an [`ErrorLogger`] and never surfaced to the operator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Listing payments failed
    FetchFailed,
    /// Changing a payment's status failed
    UpdateFailed,
    /// Backend rejected the session token
    Unauthorized,
    /// Payment id not in the loaded list
    PaymentNotFound,
    /// Backend payload could not be decoded
    InvalidFormat,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FetchFailed => write!(f, "FETCH_FAILED"),
            ErrorCode::UpdateFailed => write!(f, "UPDATE_FAILED"),
            ErrorCode::Unauthorized => write!(f, "UNAUTHORIZED"),
            ErrorCode::PaymentNotFound => write!(f, "PAYMENT_NOT_FOUND"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for logs and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Operation may be affected
    Warning,
    /// Operation failed
    Error,
    /// Application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for paydesk-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Error fetching payments: {message}")]
    FetchFailed { message: String },

    #[error("Error updating payment {id} status: {message}")]
    UpdateFailed { id: String, message: String },

    #[error("Unauthorized: backend rejected the session token")]
    Unauthorized,

    #[error("Payment not found: {id}")]
    PaymentNotFound { id: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FetchFailed { .. } => ErrorCode::FetchFailed,
            CoreError::UpdateFailed { .. } => ErrorCode::UpdateFailed,
            CoreError::Unauthorized => ErrorCode::Unauthorized,
            CoreError::PaymentNotFound { .. } => ErrorCode::PaymentNotFound,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FetchFailed { .. } => ErrorSeverity::Error,
            CoreError::UpdateFailed { .. } => ErrorSeverity::Error,
            CoreError::Unauthorized => ErrorSeverity::Warning,
            CoreError::PaymentNotFound { .. } => ErrorSeverity::Info,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::FetchFailed { .. } => {
                details = details.with_suggestion(
                    "Check that backend.base_url points at the payments API.".to_string()
                );
                details = details.with_suggestion(
                    "Use POST /api/reload to fetch the list again.".to_string()
                );
            }
            CoreError::UpdateFailed { id, .. } => {
                details = details.with_detail(serde_json::json!({ "payment_id": id }));
            }
            CoreError::Unauthorized => {
                details = details.with_suggestion(
                    "Sign in again to refresh the token in the session file.".to_string()
                );
            }
            CoreError::InvalidFormat { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Request ID for correlating log lines
    pub request_id: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            request_id: None,
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Diagnostic channel for recovered failures
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
    /// Log debug information
    fn log_debug(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using the log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::error!(
            target: "paydesk::error",
            "{} - Operation: {} - Request: {:?} - Data: {}",
            error.to_details(),
            context.operation,
            context.request_id,
            context.data
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "paydesk::error",
            "{} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_id
        );
    }

    fn log_debug(&self, message: &str, context: &ErrorContext) {
        log::debug!(
            target: "paydesk::error",
            "{} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_id
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FetchFailed.to_string(), "FETCH_FAILED");
        assert_eq!(ErrorCode::PaymentNotFound.to_string(), "PAYMENT_NOT_FOUND");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::UpdateFailed { id: "p1".to_string(), message: "503".to_string() };
        assert_eq!(error.code(), ErrorCode::UpdateFailed);
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(CoreError::Unauthorized.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_error_details_fetch_failed() {
        let error = CoreError::FetchFailed { message: "connection refused".to_string() };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::FetchFailed);
        assert!(details.message.contains("connection refused"));
        assert_eq!(details.suggestions.len(), 2);
    }

    #[test]
    fn test_error_details_update_failed_carries_id() {
        let error = CoreError::UpdateFailed { id: "p9".to_string(), message: "timeout".to_string() };
        let details = error.to_details();
        assert_eq!(details.details.unwrap()["payment_id"], "p9");
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("confirm_status_change")
            .with_request_id("req-1".to_string())
            .with_data("payment_id", serde_json::json!("p1"));
        assert_eq!(context.operation, "confirm_status_change");
        assert_eq!(context.request_id.as_deref(), Some("req-1"));
        assert_eq!(context.data["payment_id"], "p1");
    }
}
