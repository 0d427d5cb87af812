//! Poll driver
//!
//! Binds a [`StatusFetcher`] to one operation id and runs a scheduler for it.
//! The outcome is handed back untouched; mapping it to exit codes or
//! messages is the caller's business.

use taskwait_core::PollOutcome;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, PollConfig};
use crate::fetcher::StatusFetcher;
use crate::scheduler::PollScheduler;
use crate::sink::ProgressSink;

/// Errors that prevent a poll session from starting
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid poll configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to start the poll loop: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Waits for remote operations to reach a terminal state
#[derive(Debug, Clone)]
pub struct PollDriver<F> {
    fetcher: F,
}

impl<F: StatusFetcher> PollDriver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Polls `operation_id` on the caller's runtime until it is terminal
    pub async fn wait_async(
        &self,
        operation_id: &str,
        config: &PollConfig,
        sink: &mut dyn ProgressSink,
    ) -> Result<PollOutcome, DriverError> {
        config.validate()?;

        info!(operation_id, "Waiting for operation to complete");

        let fetcher = &self.fetcher;
        let scheduler = PollScheduler::new(config.clone());
        Ok(scheduler
            .run(move || fetcher.fetch(operation_id), sink)
            .await)
    }

    /// Blocking variant of [`wait_async`](Self::wait_async)
    ///
    /// Every call gets its own single-threaded runtime, torn down before
    /// returning. Must not be called from inside an async context.
    pub fn wait(
        &self,
        operation_id: &str,
        config: &PollConfig,
        sink: &mut dyn ProgressSink,
    ) -> Result<PollOutcome, DriverError> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(self.wait_async(operation_id, config, sink))
    }
}
