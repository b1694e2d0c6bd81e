//! Render job domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of a server-side render job, as last reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    NotFound,
}

impl JobStatus {
    /// Whether no further transitions are expected for this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::NotFound => "not found",
        };
        f.write_str(s)
    }
}

/// Payload of a finished render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub video_url: String,
    /// Length of the rendered video in seconds
    pub duration_secs: Option<f64>,
    /// Size of the rendered file in bytes
    pub size_bytes: Option<u64>,
}

/// A read-only view of a job, parsed from one status response
#[derive(Debug, Clone, PartialEq)]
pub enum JobSnapshot {
    Pending {
        progress: u8,
        message: Option<String>,
    },
    Processing {
        progress: u8,
        message: Option<String>,
    },
    Completed(RenderResult),
    Failed {
        error: String,
    },
    /// The backend does not (yet) know the job
    NotFound,
    /// The body was JSON but not a status response we understand
    Malformed {
        reason: String,
    },
}

impl JobSnapshot {
    /// Parses a decoded JSON status response
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<WireJobResponse>(value) {
            Ok(wire) => wire.into_snapshot(),
            Err(e) => JobSnapshot::Malformed {
                reason: format!("unexpected response shape: {}", e),
            },
        }
    }

    /// Status this snapshot represents; `None` for malformed responses
    pub fn status(&self) -> Option<JobStatus> {
        match self {
            JobSnapshot::Pending { .. } => Some(JobStatus::Pending),
            JobSnapshot::Processing { .. } => Some(JobStatus::Processing),
            JobSnapshot::Completed(_) => Some(JobStatus::Completed),
            JobSnapshot::Failed { .. } => Some(JobStatus::Failed),
            JobSnapshot::NotFound => Some(JobStatus::NotFound),
            JobSnapshot::Malformed { .. } => None,
        }
    }

    /// Progress in percent, always within 0..=100
    pub fn progress(&self) -> u8 {
        match self {
            JobSnapshot::Pending { progress, .. } | JobSnapshot::Processing { progress, .. } => {
                *progress
            }
            JobSnapshot::Completed(_) => 100,
            _ => 0,
        }
    }
}

/// Outcome of a render job creation request
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The backend rendered synchronously and already has the result
    Completed(RenderResult),
    /// The backend refused or failed the job outright
    Failed { error: String },
    /// The job was queued and must be polled
    Accepted {
        job_id: String,
        snapshot: JobSnapshot,
    },
    Malformed { reason: String },
}

impl CreateOutcome {
    /// Parses a decoded JSON creation response
    pub fn from_value(value: Value) -> Self {
        let wire = match serde_json::from_value::<WireJobResponse>(value) {
            Ok(wire) => wire,
            Err(e) => {
                return CreateOutcome::Malformed {
                    reason: format!("unexpected response shape: {}", e),
                };
            }
        };

        let job_id = wire.job_id.clone().filter(|id| !id.trim().is_empty());

        // A bare acknowledgement with a job id means the job is queued
        if wire.ok != Some(false) && wire.status.is_none() {
            if let Some(job_id) = job_id.as_ref() {
                let snapshot = JobSnapshot::Pending {
                    progress: clamp_progress(wire.progress),
                    message: wire.message,
                };
                return CreateOutcome::Accepted {
                    job_id: job_id.clone(),
                    snapshot,
                };
            }
        }

        match wire.into_snapshot() {
            JobSnapshot::Completed(result) => CreateOutcome::Completed(result),
            JobSnapshot::Failed { error } => CreateOutcome::Failed { error },
            JobSnapshot::NotFound => CreateOutcome::Failed {
                error: "job not found".to_string(),
            },
            JobSnapshot::Malformed { reason } => CreateOutcome::Malformed { reason },
            snapshot @ (JobSnapshot::Pending { .. } | JobSnapshot::Processing { .. }) => {
                match job_id {
                    Some(job_id) => CreateOutcome::Accepted { job_id, snapshot },
                    None => CreateOutcome::Malformed {
                        reason: "job accepted without a jobId".to_string(),
                    },
                }
            }
        }
    }
}

/// Response body shared by the create and status endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireJobResponse {
    ok: Option<bool>,
    job_id: Option<String>,
    status: Option<String>,
    progress: Option<f64>,
    message: Option<String>,
    video_url: Option<String>,
    duration: Option<f64>,
    size: Option<f64>,
    error: Option<String>,
}

impl WireJobResponse {
    fn into_snapshot(self) -> JobSnapshot {
        if self.ok == Some(false) {
            let error = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "request failed".to_string());
            if error.to_ascii_lowercase().contains("not found") {
                return JobSnapshot::NotFound;
            }
            return JobSnapshot::Failed { error };
        }

        let Some(status) = self.status else {
            return JobSnapshot::Malformed {
                reason: "missing status".to_string(),
            };
        };

        match status.to_ascii_lowercase().as_str() {
            "pending" => JobSnapshot::Pending {
                progress: clamp_progress(self.progress),
                message: self.message,
            },
            "processing" => JobSnapshot::Processing {
                progress: clamp_progress(self.progress),
                message: self.message,
            },
            "completed" => match self.video_url {
                Some(video_url) if !video_url.is_empty() => JobSnapshot::Completed(RenderResult {
                    video_url,
                    duration_secs: self.duration.filter(|d| d.is_finite() && *d >= 0.0),
                    size_bytes: self
                        .size
                        .filter(|s| s.is_finite() && *s >= 0.0)
                        .map(|s| s as u64),
                }),
                _ => JobSnapshot::Malformed {
                    reason: "completed without videoUrl".to_string(),
                },
            },
            "failed" => JobSnapshot::Failed {
                error: self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| "rendering failed".to_string()),
            },
            "not_found" | "not-found" => JobSnapshot::NotFound,
            other => JobSnapshot::Malformed {
                reason: format!("unknown status '{}'", other),
            },
        }
    }
}

/// Clamps a reported progress value into 0..=100
pub fn clamp_progress(raw: Option<f64>) -> u8 {
    match raw {
        Some(p) if p.is_finite() => p.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_processing() {
        let snapshot =
            JobSnapshot::from_value(json!({"ok": true, "status": "processing", "progress": 42}));
        assert_eq!(
            snapshot,
            JobSnapshot::Processing {
                progress: 42,
                message: None
            }
        );
        assert_eq!(snapshot.status(), Some(JobStatus::Processing));
    }

    #[test]
    fn test_status_completed_carries_result() {
        let snapshot = JobSnapshot::from_value(json!({
            "ok": true,
            "status": "completed",
            "videoUrl": "/media/x.mp4",
            "duration": 65,
            "size": 1048576
        }));
        assert_eq!(
            snapshot,
            JobSnapshot::Completed(RenderResult {
                video_url: "/media/x.mp4".to_string(),
                duration_secs: Some(65.0),
                size_bytes: Some(1048576),
            })
        );
    }

    #[test]
    fn test_completed_without_url_is_malformed() {
        let snapshot = JobSnapshot::from_value(json!({"ok": true, "status": "completed"}));
        assert!(matches!(snapshot, JobSnapshot::Malformed { .. }));
    }

    #[test]
    fn test_failed_uses_server_message() {
        let snapshot = JobSnapshot::from_value(json!({
            "ok": true,
            "status": "failed",
            "error": "ffmpeg exited with code 1"
        }));
        assert_eq!(
            snapshot,
            JobSnapshot::Failed {
                error: "ffmpeg exited with code 1".to_string()
            }
        );
    }

    #[test]
    fn test_not_found_variants() {
        let by_status = JobSnapshot::from_value(json!({"ok": true, "status": "not_found"}));
        let by_error = JobSnapshot::from_value(json!({"ok": false, "error": "Job not found"}));
        assert_eq!(by_status, JobSnapshot::NotFound);
        assert_eq!(by_error, JobSnapshot::NotFound);
    }

    #[test]
    fn test_ok_false_is_failure() {
        let snapshot = JobSnapshot::from_value(json!({"ok": false, "error": "disk full"}));
        assert_eq!(
            snapshot,
            JobSnapshot::Failed {
                error: "disk full".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_or_missing_status_is_malformed() {
        assert!(matches!(
            JobSnapshot::from_value(json!({"ok": true})),
            JobSnapshot::Malformed { .. }
        ));
        assert!(matches!(
            JobSnapshot::from_value(json!({"ok": true, "status": "exploded"})),
            JobSnapshot::Malformed { .. }
        ));
        assert!(matches!(
            JobSnapshot::from_value(json!([1, 2, 3])),
            JobSnapshot::Malformed { .. }
        ));
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(clamp_progress(Some(-5.0)), 0);
        assert_eq!(clamp_progress(Some(150.0)), 100);
        assert_eq!(clamp_progress(Some(41.6)), 42);
        assert_eq!(clamp_progress(Some(f64::NAN)), 0);
        assert_eq!(clamp_progress(None), 0);

        let snapshot =
            JobSnapshot::from_value(json!({"ok": true, "status": "processing", "progress": 250}));
        assert_eq!(snapshot.progress(), 100);
    }

    #[test]
    fn test_create_accepted() {
        let outcome = CreateOutcome::from_value(json!({
            "ok": true,
            "jobId": "j1",
            "status": "pending",
            "progress": 0
        }));
        assert_eq!(
            outcome,
            CreateOutcome::Accepted {
                job_id: "j1".to_string(),
                snapshot: JobSnapshot::Pending {
                    progress: 0,
                    message: None
                },
            }
        );
    }

    #[test]
    fn test_create_completed_fast_path() {
        let outcome = CreateOutcome::from_value(json!({
            "ok": true,
            "status": "completed",
            "videoUrl": "/media/y.mp4"
        }));
        assert_eq!(
            outcome,
            CreateOutcome::Completed(RenderResult {
                video_url: "/media/y.mp4".to_string(),
                duration_secs: None,
                size_bytes: None,
            })
        );
    }

    #[test]
    fn test_create_bare_job_id_is_pending() {
        let outcome = CreateOutcome::from_value(json!({"ok": true, "jobId": "j9"}));
        assert!(matches!(outcome, CreateOutcome::Accepted { ref job_id, .. } if job_id == "j9"));
    }

    #[test]
    fn test_create_pending_without_job_id_is_malformed() {
        let outcome = CreateOutcome::from_value(json!({"ok": true, "status": "pending"}));
        assert!(matches!(outcome, CreateOutcome::Malformed { .. }));
    }

    #[test]
    fn test_create_rejected() {
        let outcome = CreateOutcome::from_value(json!({"ok": false, "error": "no clips"}));
        assert_eq!(
            outcome,
            CreateOutcome::Failed {
                error: "no clips".to_string()
            }
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(!JobStatus::NotFound.is_terminal());
    }
}
