//! Render job poller
//!
//! Submits a render job, then checks its status on a fixed interval until the
//! job completes, fails, or stays unknown for too many consecutive checks.
//!
//! State lives in the poller instance, one per workflow session. Submitting
//! again resets it, which abandons tracking of any earlier job.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::progress::ProgressSink;
use studio_client::JobApi;
use studio_core::domain::job::{CreateOutcome, JobSnapshot, RenderResult};
use studio_core::dto::job::RenderRequest;

/// Timing and retry settings for a poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    /// Fixed time between status checks
    pub interval: Duration,
    /// Consecutive "not found" answers tolerated; the last one fails the job
    pub not_found_budget: u32,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            not_found_budget: 5,
        }
    }
}

/// Where the poller is in a job's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Submitting,
    Polling,
    Completed,
    Failed,
}

/// Terminal result of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Completed(RenderResult),
    Failed(String),
}

/// Submits render jobs and polls them to completion
pub struct JobPoller {
    api: Arc<dyn JobApi>,
    sink: Arc<dyn ProgressSink>,
    settings: PollerSettings,
    state: PollerState,
    job_id: Option<String>,
    not_found_count: u32,
    polls: u32,
    timer_started: bool,
    progress: u8,
    last_snapshot: Option<JobSnapshot>,
}

impl JobPoller {
    /// Creates an idle poller
    pub fn new(api: Arc<dyn JobApi>, sink: Arc<dyn ProgressSink>, settings: PollerSettings) -> Self {
        Self {
            api,
            sink,
            settings,
            state: PollerState::Idle,
            job_id: None,
            not_found_count: 0,
            polls: 0,
            timer_started: false,
            progress: 0,
            last_snapshot: None,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Identifier of the job being tracked, if the backend queued one
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    /// Status checks issued since the last submission
    pub fn polls_issued(&self) -> u32 {
        self.polls
    }

    /// Whether the last submission needed an interval timer at all
    pub fn timer_started(&self) -> bool {
        self.timer_started
    }

    /// The most recent status the backend reported
    pub fn last_snapshot(&self) -> Option<&JobSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Submits a render job and waits for its terminal outcome
    ///
    /// Any job tracked by an earlier submission is abandoned.
    pub async fn submit(&mut self, req: &RenderRequest) -> PollOutcome {
        self.reset();
        self.state = PollerState::Submitting;
        self.sink.update(0, "Submitting render job");

        let created = match self.api.create_job(req).await {
            Ok(created) => created,
            Err(e) => return self.fail(format!("Failed to create render job: {}", e)),
        };

        match created {
            CreateOutcome::Completed(result) => {
                info!("Render finished without queueing");
                self.complete(result)
            }
            CreateOutcome::Failed { error } => self.fail(error),
            CreateOutcome::Malformed { reason } => {
                self.fail(format!("Invalid response from server: {}", reason))
            }
            CreateOutcome::Accepted { job_id, snapshot } => {
                info!("Render job {} accepted", job_id);
                self.job_id = Some(job_id.clone());
                self.show(&snapshot);
                self.last_snapshot = Some(snapshot);
                self.poll_until_done(&job_id).await
            }
        }
    }

    /// Checks status on a fixed interval until a terminal outcome
    ///
    /// Each check is awaited before the next tick is taken, so two checks for
    /// the same job never overlap.
    async fn poll_until_done(&mut self, job_id: &str) -> PollOutcome {
        self.state = PollerState::Polling;
        self.timer_started = true;

        let period = self.settings.interval.max(Duration::from_millis(1));
        let mut ticker = time::interval_at(Instant::now() + period, period);
        // A slow response pushes the next check back instead of bunching ticks
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Some(outcome) = self.poll_once(job_id).await {
                return outcome;
            }
        }
    }

    /// Performs a single poll cycle; `Some` once the job is terminal
    async fn poll_once(&mut self, job_id: &str) -> Option<PollOutcome> {
        self.polls += 1;
        debug!("Checking status of job {} (poll #{})", job_id, self.polls);

        let snapshot = match self.api.job_status(job_id).await {
            Ok(snapshot) => snapshot,
            Err(e) if e.is_transport() => {
                warn!("Status check for job {} failed, will retry: {}", job_id, e);
                return None;
            }
            Err(e) => return Some(self.fail(e.to_string())),
        };

        let outcome = match &snapshot {
            JobSnapshot::Pending { .. } | JobSnapshot::Processing { .. } => {
                self.not_found_count = 0;
                self.show(&snapshot);
                None
            }
            JobSnapshot::NotFound => {
                self.not_found_count += 1;
                let budget = self.settings.not_found_budget;

                if self.not_found_count >= budget {
                    Some(self.fail(format!(
                        "Job {} not found after {} attempts",
                        job_id, self.not_found_count
                    )))
                } else {
                    warn!(
                        "Job {} not found ({}/{}), retrying",
                        job_id, self.not_found_count, budget
                    );
                    let line = format!(
                        "Waiting for job to appear ({}/{})",
                        self.not_found_count, budget
                    );
                    self.sink.update(self.progress, &line);
                    None
                }
            }
            JobSnapshot::Completed(result) => Some(self.complete(result.clone())),
            JobSnapshot::Failed { error } => Some(self.fail(error.clone())),
            JobSnapshot::Malformed { reason } => {
                Some(self.fail(format!("Invalid status response: {}", reason)))
            }
        };

        self.last_snapshot = Some(snapshot);
        outcome
    }

    fn show(&mut self, snapshot: &JobSnapshot) {
        self.progress = snapshot.progress();
        self.sink.update(self.progress, &status_line(snapshot));
    }

    fn complete(&mut self, result: RenderResult) -> PollOutcome {
        info!("Render completed: {}", result.video_url);
        self.state = PollerState::Completed;
        self.progress = 100;
        self.sink.completed(&result);
        PollOutcome::Completed(result)
    }

    fn fail(&mut self, message: String) -> PollOutcome {
        warn!("Render failed: {}", message);
        self.state = PollerState::Failed;
        self.sink.failed(&message);
        PollOutcome::Failed(message)
    }

    fn reset(&mut self) {
        self.state = PollerState::Idle;
        self.job_id = None;
        self.not_found_count = 0;
        self.polls = 0;
        self.timer_started = false;
        self.progress = 0;
        self.last_snapshot = None;
    }
}

/// Human-readable line for a non-terminal snapshot
fn status_line(snapshot: &JobSnapshot) -> String {
    match snapshot {
        JobSnapshot::Pending { message, .. } => message.clone().unwrap_or_else(|| "Queued".to_string()),
        JobSnapshot::Processing { message, .. } => {
            message.clone().unwrap_or_else(|| "Rendering".to_string())
        }
        JobSnapshot::Completed(_) => "Completed".to_string(),
        JobSnapshot::Failed { error } => error.clone(),
        JobSnapshot::NotFound => "Job not found".to_string(),
        JobSnapshot::Malformed { reason } => reason.clone(),
    }
}
