//! Poll session outcome types

use chrono::{DateTime, TimeDelta};
use std::time::Duration;
use thiserror::Error;

use crate::domain::notification::StatusSnapshot;
use crate::error::FetchError;

/// The single terminal result of one poll session
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// A terminal snapshot arrived before the watchdog fired
    Completed {
        snapshot: StatusSnapshot,
        duration: TaskDuration,
    },
    /// The fetch failed, or the remote service reported a failure
    Failed(PollFailure),
    /// The watchdog fired before any terminal snapshot was observed
    TimedOut {
        elapsed: Duration,
        last_snapshot: Option<StatusSnapshot>,
    },
}

impl PollOutcome {
    /// Builds a `Completed` outcome, measuring the task from its timestamps
    pub fn completed(snapshot: StatusSnapshot) -> Self {
        let duration = TaskDuration::between(
            snapshot.created_at.as_deref(),
            snapshot.completed_at.as_deref(),
        );
        Self::Completed { snapshot, duration }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Most recent snapshot the session saw, if any
    pub fn snapshot(&self) -> Option<&StatusSnapshot> {
        match self {
            Self::Completed { snapshot, .. } => Some(snapshot),
            Self::Failed(PollFailure::Remote { snapshot }) => Some(snapshot),
            Self::Failed(PollFailure::Fetch(_)) => None,
            Self::TimedOut { last_snapshot, .. } => last_snapshot.as_ref(),
        }
    }
}

/// Why a session ended in `Failed`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PollFailure {
    #[error("failed to fetch operation status: {0}")]
    Fetch(#[from] FetchError),

    #[error(
        "operation {} finished with status \"{}\"",
        .snapshot.operation_id,
        .snapshot.status
    )]
    Remote { snapshot: StatusSnapshot },
}

/// Wall-clock length of a completed task, `completed_at - created_at`
///
/// Bad timestamps never fail a session; they show up here instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDuration {
    Exact(TimeDelta),
    /// `completed_at` precedes `created_at`; the raw signed value is kept
    Negative(TimeDelta),
    /// A timestamp is missing or not RFC 3339
    Unknown,
}

impl TaskDuration {
    pub fn between(created_at: Option<&str>, completed_at: Option<&str>) -> Self {
        let (Some(created_at), Some(completed_at)) = (created_at, completed_at) else {
            return Self::Unknown;
        };
        let (Ok(start), Ok(end)) = (
            DateTime::parse_from_rfc3339(created_at),
            DateTime::parse_from_rfc3339(completed_at),
        ) else {
            return Self::Unknown;
        };

        let delta = end.signed_duration_since(start);
        if delta < TimeDelta::zero() {
            Self::Negative(delta)
        } else {
            Self::Exact(delta)
        }
    }

    /// Whole seconds, signed, when the duration could be computed
    pub fn num_seconds(&self) -> Option<i64> {
        match self {
            Self::Exact(delta) | Self::Negative(delta) => Some(delta.num_seconds()),
            Self::Unknown => None,
        }
    }

    pub fn is_anomalous(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }
}
