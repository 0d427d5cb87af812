//! Data Transfer Objects
//!
//! Fragments of remote API payloads. Other commands of the remote API answer
//! with a HAL document that links to the notification tracking their work;
//! these types let a caller pull that link back out.

pub mod links;
