//! Taskwait Poller
//!
//! Waits for a remote long-running operation to reach a terminal state.
//!
//! Architecture:
//! - Fetcher: capability returning one status snapshot per call
//! - Sink: observer of progress and of the final outcome
//! - Scheduler: one session with a first check, a periodic check and a
//!   watchdog, resolving to exactly one [`PollOutcome`]
//! - Driver: binds a fetcher to an operation id and runs a fresh scheduler
//!   per call
//!
//! ```no_run
//! use taskwait_client::NotificationsClient;
//! use taskwait_poller::{PollConfig, PollDriver, TracingSink};
//!
//! let driver = PollDriver::new(NotificationsClient::new("http://localhost:8080/api"));
//! let outcome = driver.wait(
//!     "42b56cff-0b55-4bdf-a949-1fd0fca61c6c",
//!     &PollConfig::default(),
//!     &mut TracingSink,
//! )?;
//! println!("{:?}", outcome);
//! # Ok::<(), taskwait_poller::DriverError>(())
//! ```

pub mod config;
pub mod driver;
pub mod fetcher;
pub mod policy;
pub mod scheduler;
pub mod sink;

pub use config::{ConfigError, PollConfig};
pub use driver::{DriverError, PollDriver};
pub use fetcher::StatusFetcher;
pub use policy::TerminalPolicy;
pub use scheduler::PollScheduler;
pub use sink::{NoopSink, ProgressSink, TracingSink};
pub use taskwait_core::{FetchError, PollFailure, PollOutcome, StatusSnapshot, TaskDuration};
