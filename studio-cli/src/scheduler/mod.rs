//! Scheduler layer
//!
//! Drives long-running render jobs: submits them and watches their status
//! until they reach a terminal state.

pub mod poller;

pub use poller::{JobPoller, PollOutcome, PollerSettings, PollerState};
