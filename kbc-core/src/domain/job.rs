//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::{id_from_string_or_number, optional_id_from_string_or_number};

/// A job as reported by `GET /jobs/{id}` on the Queue API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default, deserialize_with = "optional_id_from_string_or_number")]
    pub config: Option<String>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Free-form result object; shape depends on the component
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl Job {
    /// The `result.message` text, if the job reported one
    pub fn result_message(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|result| result.get("message"))
            .and_then(|message| message.as_str())
    }

    /// Wall-clock run time, once the job has both started and ended
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
            _ => None,
        }
    }
}

/// Queue job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Created,
    Waiting,
    Processing,
    Success,
    Error,
    Warning,
    Terminating,
    Cancelled,
    Terminated,
    /// A status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether the job has reached a state it will not leave
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStatus::Success
                | JobStatus::Error
                | JobStatus::Warning
                | JobStatus::Cancelled
                | JobStatus::Terminated
        )
    }

    /// Whether a finished job produced its output (warnings included)
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Warning)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Created => "created",
            JobStatus::Waiting => "waiting",
            JobStatus::Processing => "processing",
            JobStatus::Success => "success",
            JobStatus::Error => "error",
            JobStatus::Warning => "warning",
            JobStatus::Terminating => "terminating",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Terminated => "terminated",
            JobStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_from_queue_payload() {
        let job: Job = serde_json::from_value(json!({
            "id": "676625356",
            "status": "success",
            "component": "keboola.ex-http",
            "config": 12345,
            "createdTime": "2024-03-04T21:59:49+00:00",
            "startTime": "2024-03-04T22:00:01+00:00",
            "endTime": "2024-03-04T23:01:31+01:00",
            "result": {"message": "Component processing finished."},
            "isFinished": true
        }))
        .unwrap();

        assert_eq!(job.id, "676625356");
        assert_eq!(job.status, JobStatus::Success);
        assert_eq!(job.config.as_deref(), Some("12345"));
        assert_eq!(job.result_message(), Some("Component processing finished."));
        // endTime carries a +01:00 offset
        assert_eq!(job.duration().map(|d| d.num_seconds()), Some(90));
    }

    #[test]
    fn test_unknown_status_does_not_fail_parsing() {
        let job: Job = serde_json::from_value(json!({"id": 1, "status": "hibernating"})).unwrap();
        assert_eq!(job.status, JobStatus::Unknown);
        assert!(!job.status.is_finished());
        assert!(job.result_message().is_none());
        assert!(job.duration().is_none());
    }

    #[test]
    fn test_finished_states() {
        for status in [
            JobStatus::Success,
            JobStatus::Error,
            JobStatus::Warning,
            JobStatus::Cancelled,
            JobStatus::Terminated,
        ] {
            assert!(status.is_finished(), "{} should be finished", status);
        }
        for status in [
            JobStatus::Created,
            JobStatus::Waiting,
            JobStatus::Processing,
            JobStatus::Terminating,
        ] {
            assert!(!status.is_finished(), "{} should not be finished", status);
        }
    }

    #[test]
    fn test_success_includes_warning() {
        assert!(JobStatus::Success.is_success());
        assert!(JobStatus::Warning.is_success());
        assert!(!JobStatus::Error.is_success());
    }
}
