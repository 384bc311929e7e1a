//! Keboola HTTP Client
//!
//! A small, type-safe async client for the Keboola Storage and Queue APIs.
//!
//! # Example
//!
//! ```no_run
//! use kbc_client::KeboolaClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = KeboolaClient::new("https://connection.keboola.com", "my-token");
//!
//!     for table in client.list_tables().await? {
//!         println!("{} ({} columns)", table.qualified_name(), table.columns.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod tables;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use jobs::WaitOptions;
pub use kbc_core::domain::job::{Job, JobStatus};
pub use kbc_core::domain::table::{Column, Table};
pub use kbc_core::dto::job::QueueJob;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header carrying the Storage API token on every request
pub const TOKEN_HEADER: &str = "X-StorageApi-Token";

/// HTTP client for a single Keboola stack
///
/// Storage calls go to the connection URL; queue calls go to the matching
/// `queue.` host, derived from the connection URL unless overridden.
#[derive(Clone)]
pub struct KeboolaClient {
    /// Connection URL of the stack (e.g., "https://connection.keboola.com")
    base_url: String,
    /// Queue API URL (e.g., "https://queue.keboola.com")
    queue_url: String,
    /// Storage API token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl KeboolaClient {
    /// Create a new client for a stack
    ///
    /// # Arguments
    /// * `base_url` - The connection URL of the stack
    /// * `token` - A Storage API token
    ///
    /// # Example
    /// ```
    /// use kbc_client::KeboolaClient;
    ///
    /// let client = KeboolaClient::new("https://connection.eu-central-1.keboola.com/", "token");
    /// assert_eq!(client.queue_url(), "https://queue.eu-central-1.keboola.com");
    /// ```
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let queue_url = derive_queue_url(&base_url);
        Self {
            base_url,
            queue_url,
            token: token.into(),
            client,
        }
    }

    /// Use an explicit Queue API URL instead of the derived one
    pub fn with_queue_url(mut self, queue_url: impl Into<String>) -> Self {
        self.queue_url = queue_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the connection URL of the stack
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the Queue API URL
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// Attach the token header to a request
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(TOKEN_HEADER, &self.token)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

impl std::fmt::Debug for KeboolaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeboolaClient")
            .field("base_url", &self.base_url)
            .field("queue_url", &self.queue_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// `https://connection.<stack>` -> `https://queue.<stack>`
fn derive_queue_url(base_url: &str) -> String {
    base_url
        .replace("connection", "queue")
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = KeboolaClient::new("https://connection.keboola.com", "token");
        assert_eq!(client.base_url(), "https://connection.keboola.com");
        assert_eq!(client.queue_url(), "https://queue.keboola.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = KeboolaClient::new("https://connection.eu-central-1.keboola.com/", "token");
        assert_eq!(client.base_url(), "https://connection.eu-central-1.keboola.com");
        assert_eq!(client.queue_url(), "https://queue.eu-central-1.keboola.com");
    }

    #[test]
    fn test_queue_url_override() {
        let client = KeboolaClient::new("http://localhost:8080", "token")
            .with_queue_url("http://localhost:9090/");
        assert_eq!(client.queue_url(), "http://localhost:9090");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = KeboolaClient::with_client("http://localhost:8080", "token", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.queue_url(), "http://localhost:8080");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = KeboolaClient::new("http://localhost:8080", "super-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
