//! Poll scheduler
//!
//! Drives a [`Session`] with three timers on the current runtime:
//! - the first check, `first_check_delay` after start
//! - periodic checks on multiples of `interval` from start
//! - the watchdog, `timeout` after start
//!
//! Everything lives on the stack of [`PollScheduler::run`], so returning
//! drops every pending timer.

use std::future::Future;
use std::time::Duration;
use taskwait_core::{FetchError, PollOutcome, StatusSnapshot};
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::config::PollConfig;
use crate::scheduler::session::{Event, Session};
use crate::sink::ProgressSink;

/// Stand-in for "never" when a deadline does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `base + offset`, saturating to roughly 30 years out on overflow
fn deadline_after(base: Instant, offset: Duration) -> Instant {
    base.checked_add(offset).unwrap_or_else(|| base + FAR_FUTURE)
}

/// Check deadlines of one session
///
/// After the first check, the next deadline is the first multiple of
/// `interval` after now, so a fetch slower than `interval` skips the ticks
/// it overran instead of firing them back-to-back.
#[derive(Debug)]
struct Cadence {
    started: Instant,
    first_check: Option<Instant>,
    interval: Duration,
}

impl Cadence {
    fn new(started: Instant, first_check_delay: Duration, interval: Duration) -> Self {
        Self {
            started,
            first_check: Some(deadline_after(started, first_check_delay)),
            interval,
        }
    }

    fn next_deadline(&mut self, now: Instant) -> Instant {
        if let Some(first) = self.first_check.take() {
            return first;
        }

        let since_start = now.saturating_duration_since(self.started);
        let ticks = since_start.as_nanos() / self.interval.as_nanos().max(1) + 1;
        let offset = u32::try_from(ticks)
            .ok()
            .and_then(|ticks| self.interval.checked_mul(ticks))
            .unwrap_or(Duration::MAX);
        deadline_after(self.started, offset)
    }
}

/// Runs poll sessions with a fixed configuration
#[derive(Debug, Clone)]
pub struct PollScheduler {
    config: PollConfig,
}

impl PollScheduler {
    /// Creates a scheduler; `config` is expected to be validated
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Runs one session to its terminal outcome
    ///
    /// `fetch` is invoked once per check. The watchdog can fire while a fetch
    /// is in flight; that fetch is dropped and never reported.
    pub async fn run<F, Fut>(&self, mut fetch: F, sink: &mut dyn ProgressSink) -> PollOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<StatusSnapshot, FetchError>>,
    {
        let started = Instant::now();
        let mut session = Session::new(self.config.policy, started);
        let mut cadence = Cadence::new(
            started,
            self.config.first_check_delay,
            self.config.interval,
        );

        let watchdog = time::sleep_until(deadline_after(started, self.config.timeout));
        tokio::pin!(watchdog);

        info!(
            interval = ?self.config.interval,
            timeout = ?self.config.timeout,
            "Poll session started"
        );

        loop {
            let deadline = cadence.next_deadline(Instant::now());

            let event = tokio::select! {
                biased;
                () = &mut watchdog => Event::Watchdog,
                result = self.check(deadline, &mut fetch) => Event::Checked(result),
            };

            if let Some(outcome) = session.handle(event, sink) {
                return outcome;
            }
        }
    }

    async fn check<F, Fut>(
        &self,
        deadline: Instant,
        fetch: &mut F,
    ) -> Result<StatusSnapshot, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<StatusSnapshot, FetchError>>,
    {
        time::sleep_until(deadline).await;
        debug!("Checking operation status");

        match self.config.fetch_timeout {
            Some(limit) => match time::timeout(limit, fetch()).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::TimedOut(limit)),
            },
            None => fetch().await,
        }
    }
}
