//! Configuration module
//!
//! Connection settings collected from flags and environment variables.

use std::time::Duration;

use anyhow::{Context, Result};
use kbc_client::KeboolaClient;

/// Connection URL used when neither `--url` nor `KBC_URL` is given
pub const DEFAULT_URL: &str = "https://connection.keboola.com";

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// Connection URL of the Keboola stack
    pub url: String,

    /// Storage API token; only commands that talk to Keboola need it
    pub token: Option<String>,

    /// Explicit Queue API URL, otherwise derived from `url`
    pub queue_url: Option<String>,

    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        check_http_url("url", &self.url)?;

        if let Some(queue_url) = &self.queue_url {
            check_http_url("queue_url", queue_url)?;
        }

        if self.http_timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }

    /// Build an API client; fails on invalid settings or a missing token
    pub fn client(&self) -> Result<KeboolaClient> {
        self.validate()?;

        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .context("A Storage API token is required (use --token or KBC_TOKEN)")?;

        let http_client = reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let client = KeboolaClient::with_client(&self.url, token, http_client);
        Ok(match &self.queue_url {
            Some(queue_url) => client.with_queue_url(queue_url),
            None => client,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("queue_url", &self.queue_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn check_http_url(name: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }

    Ok(())
}
