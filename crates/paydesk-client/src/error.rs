//! Error types for paydesk-client

use paydesk_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid backend URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend rejected the session token")]
    Unauthorized,

    #[error("Backend error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Map to the core error for a failed list request
    pub fn into_fetch_error(self) -> CoreError {
        match self {
            ClientError::Unauthorized => CoreError::Unauthorized,
            ClientError::Decode(e) => CoreError::InvalidFormat { message: e.to_string() },
            other => CoreError::FetchFailed { message: other.to_string() },
        }
    }

    /// Map to the core error for a failed status update of `id`
    pub fn into_update_error(self, id: &str) -> CoreError {
        match self {
            ClientError::Unauthorized => CoreError::Unauthorized,
            ClientError::Status { status: 404, .. } => CoreError::PaymentNotFound { id: id.to_string() },
            other => CoreError::UpdateFailed {
                id: id.to_string(),
                message: other.to_string(),
            },
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_core_unauthorized() {
        assert_eq!(ClientError::Unauthorized.into_fetch_error(), CoreError::Unauthorized);
        assert_eq!(ClientError::Unauthorized.into_update_error("1"), CoreError::Unauthorized);
    }

    #[test]
    fn test_status_maps_by_operation() {
        let err = ClientError::Status { status: 500, body: "boom".to_string() };
        assert_eq!(
            err.into_fetch_error(),
            CoreError::FetchFailed { message: "Backend error 500: boom".to_string() }
        );

        let missing = ClientError::Status { status: 404, body: String::new() };
        assert_eq!(missing.into_update_error("abc"), CoreError::PaymentNotFound { id: "abc".to_string() });
    }
}
