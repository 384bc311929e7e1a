//! Queue job endpoints

use std::time::Duration;

use kbc_core::domain::job::{Job, JobStatus};
use kbc_core::dto::job::{QueueJob, QueuedJob};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::KeboolaClient;
use crate::error::{ClientError, Result};

/// How [`KeboolaClient::wait_for_job`] polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Delay between status checks
    pub poll_interval: Duration,
    /// Give up once this much time has passed; values too large to add to the
    /// current instant wait without a deadline
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl KeboolaClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Queue a component configuration run
    ///
    /// # Returns
    /// The id of the queued job
    ///
    /// # Example
    /// ```no_run
    /// # use kbc_client::{KeboolaClient, QueueJob};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = KeboolaClient::new("https://connection.keboola.com", "token");
    /// let job_id = client
    ///     .queue_job(QueueJob::run("keboola.ex-http", "12345").with_variable("date", "2024-01-01"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn queue_job(&self, req: QueueJob) -> Result<String> {
        let url = format!("{}/jobs", self.queue_url);
        debug!("POST {} (component {}, config {})", url, req.component, req.config);
        let response = self
            .authorized(self.client.post(&url))
            .json(&req)
            .send()
            .await?;

        let queued: QueuedJob = self.handle_response(response).await?;
        info!(
            "Queued job {} for {}/{}",
            queued.id, req.component, req.config
        );

        Ok(queued.id)
    }

    /// Get a job by id
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let url = format!("{}/jobs/{}", self.queue_url, job_id);
        debug!("GET {}", url);
        let response = self.authorized(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }

    /// Get just the current status of a job
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        Ok(self.get_job(job_id).await?.status)
    }

    /// Poll a job until it finishes
    ///
    /// # Returns
    /// The job in its final state, whether that is success or failure
    ///
    /// # Errors
    /// [`ClientError::Timeout`] when the job is still running after `options.timeout`.
    pub async fn wait_for_job(&self, job_id: &str, options: WaitOptions) -> Result<Job> {
        if options.poll_interval.is_zero() {
            return Err(ClientError::InvalidRequest(
                "poll interval must be greater than 0".to_string(),
            ));
        }

        let started = Instant::now();
        // A timeout too large to represent means no deadline
        let deadline = started.checked_add(options.timeout);
        let mut interval = time::interval(options.poll_interval);
        let mut last_status = None;

        loop {
            interval.tick().await;

            let job = self.get_job(job_id).await?;

            if last_status != Some(job.status) {
                match job.status {
                    JobStatus::Unknown => warn!("Job {} reported an unrecognised status", job_id),
                    status => info!("Job {} is {}", job_id, status),
                }
                last_status = Some(job.status);
            }

            if job.status.is_finished() {
                return Ok(job);
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(ClientError::Timeout {
                    job_id: job_id.to_string(),
                    status: job.status,
                    waited: started.elapsed(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wait_options() {
        let options = WaitOptions::default();
        assert_eq!(options.poll_interval, Duration::from_secs(5));
        assert_eq!(options.timeout, Duration::from_secs(1800));
    }

    #[tokio::test]
    async fn test_zero_poll_interval_is_rejected() {
        let client = KeboolaClient::new("http://localhost:1", "token");
        let options = WaitOptions {
            poll_interval: Duration::ZERO,
            timeout: Duration::from_secs(1),
        };

        let err = client.wait_for_job("1", options).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
