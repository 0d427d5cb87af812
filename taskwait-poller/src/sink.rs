//! Progress sinks
//!
//! A sink observes one poll session: every fetched snapshot, terminal or not,
//! then the outcome exactly once. Sinks run on the scheduler's loop, so a slow
//! sink delays the next check but cannot corrupt the session.

use taskwait_core::{PollOutcome, StatusSnapshot, TaskDuration};
use tracing::{info, warn};

/// Observer of a poll session
pub trait ProgressSink: Send {
    /// Called for every successfully fetched snapshot, including the terminal one
    fn on_update(&mut self, snapshot: &StatusSnapshot);

    /// Called exactly once when the session ends
    fn on_terminal(&mut self, outcome: &PollOutcome);
}

/// Sink that reports progress as structured `tracing` events
#[derive(Debug, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn on_update(&mut self, snapshot: &StatusSnapshot) {
        info!(
            operation_id = %snapshot.operation_id,
            label = %snapshot.label,
            progress = snapshot.progress,
            status = %snapshot.status,
            "Task of type {} is {}% complete",
            snapshot.label,
            snapshot.progress
        );
    }

    fn on_terminal(&mut self, outcome: &PollOutcome) {
        match outcome {
            PollOutcome::Completed { snapshot, duration } => {
                if let TaskDuration::Negative(_) | TaskDuration::Unknown = duration {
                    warn!(
                        operation_id = %snapshot.operation_id,
                        created_at = ?snapshot.created_at,
                        completed_at = ?snapshot.completed_at,
                        "Completed task has an anomalous duration"
                    );
                }
                info!(
                    operation_id = %snapshot.operation_id,
                    status = %snapshot.status,
                    seconds = ?duration.num_seconds(),
                    "Task completed"
                );
            }
            PollOutcome::Failed(failure) => warn!("Task failed: {}", failure),
            PollOutcome::TimedOut { elapsed, .. } => {
                warn!("Task did not complete within {:?}", elapsed)
            }
        }
    }
}

/// Sink that ignores everything
#[derive(Debug, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn on_update(&mut self, _snapshot: &StatusSnapshot) {}

    fn on_terminal(&mut self, _outcome: &PollOutcome) {}
}
