//! Core domain types
//!
//! `notification` models one observation of a remote long-running operation,
//! `outcome` models how a whole poll session ended.

pub mod notification;
pub mod outcome;
