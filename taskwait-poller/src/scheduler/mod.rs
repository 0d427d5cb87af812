//! Scheduler layer
//!
//! Runs one poll session on the current tokio runtime. Three timers share
//! the session: the first check, the periodic check and the watchdog. Their
//! firings are fed as events into a single [`Session`], which picks the one
//! terminal outcome and ignores anything that arrives afterwards.

pub mod poller;
pub mod session;

pub use poller::PollScheduler;
pub use session::{Event, Session};
