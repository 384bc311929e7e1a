//! Error types for the Keboola client

use std::time::Duration;

use kbc_core::domain::job::JobStatus;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Keboola client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body returned by the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A lookup matched more than one resource
    #[error("Ambiguous lookup: {0}")]
    Ambiguous(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A job did not finish in time
    #[error("Job {job_id} still {status} after {waited:?}")]
    Timeout {
        job_id: String,
        /// Last status seen before giving up
        status: JobStatus,
        waited: Duration,
    },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if the token was rejected
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::ApiError { status: 401 | 403, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let err = ClientError::api_error(404, "missing");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = ClientError::api_error(401, "Invalid access token");
        assert!(err.is_auth_error());
        assert!(!err.is_not_found());

        let err = ClientError::api_error(503, "maintenance");
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_timeout_message() {
        let err = ClientError::Timeout {
            job_id: "42".to_string(),
            status: JobStatus::Processing,
            waited: Duration::from_secs(3),
        };
        assert_eq!(err.to_string(), "Job 42 still processing after 3s");
    }
}
