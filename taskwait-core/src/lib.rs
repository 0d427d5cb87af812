//! Taskwait Core
//!
//! Core types shared by the taskwait crates.
//!
//! This crate contains:
//! - Domain types: status snapshots of a remote operation and the single
//!   terminal outcome of a poll session
//! - Errors: the failure kinds a status fetch can produce
//! - DTOs: payload fragments of the remote API that callers pick ids out of

pub mod domain;
pub mod dto;
pub mod error;

pub use domain::notification::StatusSnapshot;
pub use domain::outcome::{PollFailure, PollOutcome, TaskDuration};
pub use error::FetchError;
