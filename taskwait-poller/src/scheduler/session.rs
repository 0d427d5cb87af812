//! Poll session state machine

use taskwait_core::{FetchError, PollFailure, PollOutcome, StatusSnapshot};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::policy::{TerminalPolicy, Verdict};
use crate::sink::ProgressSink;

/// A timer firing, as seen by the session
#[derive(Debug)]
pub enum Event {
    /// A check ran and the fetch returned
    Checked(Result<StatusSnapshot, FetchError>),
    /// The overall timeout elapsed
    Watchdog,
}

#[derive(Debug)]
enum State {
    Polling { last_snapshot: Option<StatusSnapshot> },
    Concluded,
}

/// One poll session from start to its single terminal outcome
///
/// The `Polling -> Concluded` transition happens at most once; every event
/// handled after it is dropped without touching the sink.
#[derive(Debug)]
pub struct Session {
    state: State,
    policy: TerminalPolicy,
    started: Instant,
    checks: u32,
}

impl Session {
    pub fn new(policy: TerminalPolicy, started: Instant) -> Self {
        Self {
            state: State::Polling {
                last_snapshot: None,
            },
            policy,
            started,
            checks: 0,
        }
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self.state, State::Concluded)
    }

    /// Number of fetches whose result reached the session
    pub fn checks(&self) -> u32 {
        self.checks
    }

    /// Applies one event
    ///
    /// Returns the outcome on the event that concludes the session, `None`
    /// otherwise. `sink.on_terminal` is called together with that return.
    pub fn handle(&mut self, event: Event, sink: &mut dyn ProgressSink) -> Option<PollOutcome> {
        let State::Polling { last_snapshot } = &mut self.state else {
            debug!(?event, "Session already concluded, dropping event");
            return None;
        };

        let outcome = match event {
            Event::Watchdog => PollOutcome::TimedOut {
                elapsed: self.started.elapsed(),
                last_snapshot: last_snapshot.take(),
            },
            Event::Checked(Err(e)) => {
                self.checks += 1;
                PollOutcome::Failed(PollFailure::Fetch(e))
            }
            Event::Checked(Ok(snapshot)) => {
                self.checks += 1;
                sink.on_update(&snapshot);

                match self.policy.judge(&snapshot) {
                    Verdict::Pending => {
                        debug!(
                            progress = snapshot.progress,
                            status = %snapshot.status,
                            "Operation still running"
                        );
                        *last_snapshot = Some(snapshot);
                        return None;
                    }
                    Verdict::Completed => PollOutcome::completed(snapshot),
                    Verdict::Failed => PollOutcome::Failed(PollFailure::Remote { snapshot }),
                }
            }
        };

        self.state = State::Concluded;
        info!(
            checks = self.checks,
            elapsed = ?self.started.elapsed(),
            completed = outcome.is_completed(),
            "Poll session concluded"
        );
        sink.on_terminal(&outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NoopSink;
    use std::time::Duration;
    use taskwait_core::TaskDuration;

    #[derive(Default)]
    struct CountingSink {
        updates: Vec<u32>,
        terminals: usize,
    }

    impl ProgressSink for CountingSink {
        fn on_update(&mut self, snapshot: &StatusSnapshot) {
            self.updates.push(snapshot.progress);
        }

        fn on_terminal(&mut self, _outcome: &PollOutcome) {
            self.terminals += 1;
        }
    }

    fn snapshot(progress: u32) -> StatusSnapshot {
        let snapshot = StatusSnapshot::new(
            "op",
            "Backup",
            progress,
            if progress == 100 { "completed" } else { "in-progress" },
            "2024-01-01T00:00:00Z",
        );
        if progress == 100 {
            snapshot.with_completed_at("2024-01-01T00:00:37Z")
        } else {
            snapshot
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_snapshots_keep_session_open() {
        let mut session = Session::new(TerminalPolicy::TrustProgress, Instant::now());
        let mut sink = CountingSink::default();

        for progress in [0, 40, 99] {
            assert!(session.handle(Event::Checked(Ok(snapshot(progress))), &mut sink).is_none());
        }
        assert!(!session.is_concluded());
        assert_eq!(session.checks(), 3);
        assert_eq!(sink.updates, vec![0, 40, 99]);
        assert_eq!(sink.terminals, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_snapshot_concludes_once() {
        let mut session = Session::new(TerminalPolicy::TrustProgress, Instant::now());
        let mut sink = CountingSink::default();

        let outcome = session
            .handle(Event::Checked(Ok(snapshot(100))), &mut sink)
            .expect("terminal snapshot concludes");
        match outcome {
            PollOutcome::Completed { duration, .. } => {
                assert_eq!(duration, TaskDuration::Exact(chrono::TimeDelta::seconds(37)))
            }
            other => panic!("expected Completed, got {:?}", other),
        }

        // The watchdog and a late check lose the race
        assert!(session.handle(Event::Watchdog, &mut sink).is_none());
        assert!(session.handle(Event::Checked(Ok(snapshot(100))), &mut sink).is_none());
        assert_eq!(sink.terminals, 1);
        assert_eq!(sink.updates, vec![100]);
        assert_eq!(session.checks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watchdog_carries_last_snapshot() {
        let started = Instant::now();
        let mut session = Session::new(TerminalPolicy::TrustProgress, started);
        let mut sink = CountingSink::default();

        session.handle(Event::Checked(Ok(snapshot(20))), &mut sink);
        session.handle(Event::Checked(Ok(snapshot(60))), &mut sink);
        tokio::time::advance(Duration::from_secs(45)).await;

        match session.handle(Event::Watchdog, &mut sink) {
            Some(PollOutcome::TimedOut {
                elapsed,
                last_snapshot,
            }) => {
                assert!(elapsed >= Duration::from_secs(45));
                assert_eq!(last_snapshot.map(|s| s.progress), Some(60));
            }
            other => panic!("expected TimedOut, got {:?}", other),
        }

        assert!(session.handle(Event::Checked(Ok(snapshot(100))), &mut sink).is_none());
        assert_eq!(sink.terminals, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_fails_session() {
        let mut session = Session::new(TerminalPolicy::TrustProgress, Instant::now());
        let error = FetchError::Transport("connection refused".to_string());

        let outcome = session.handle(Event::Checked(Err(error.clone())), &mut NoopSink);
        assert_eq!(
            outcome,
            Some(PollOutcome::Failed(PollFailure::Fetch(error)))
        );
        assert!(session.is_concluded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_status_under_both_policies() {
        let failed = snapshot(100);
        let failed = StatusSnapshot {
            status: "failed".to_string(),
            ..failed
        };

        let mut trusting = Session::new(TerminalPolicy::TrustProgress, Instant::now());
        let outcome = trusting.handle(Event::Checked(Ok(failed.clone())), &mut NoopSink);
        assert!(matches!(outcome, Some(PollOutcome::Completed { .. })));

        let mut strict = Session::new(TerminalPolicy::HonorFailureStatus, Instant::now());
        let outcome = strict.handle(Event::Checked(Ok(failed.clone())), &mut NoopSink);
        assert_eq!(
            outcome,
            Some(PollOutcome::Failed(PollFailure::Remote { snapshot: failed }))
        );
    }
}
