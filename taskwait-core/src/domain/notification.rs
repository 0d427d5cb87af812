//! Notification domain types

use serde::{Deserialize, Serialize};

/// One observation of a remote long-running operation
///
/// The remote service calls these notifications; a fresh one is fetched on
/// every poll tick. Only `progress` decides terminality, `status` is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "uuid")]
    pub operation_id: String,
    #[serde(default)]
    pub label: String,
    pub progress: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StatusSnapshot {
    /// Progress value at which an operation is finished
    pub const COMPLETE: u32 = 100;

    /// Creates a snapshot of an operation that has not completed yet
    pub fn new(
        operation_id: impl Into<String>,
        label: impl Into<String>,
        progress: u32,
        status: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            label: label.into(),
            progress,
            status: status.into(),
            created_at: Some(created_at.into()),
            completed_at: None,
            event: None,
            description: None,
        }
    }

    /// Sets the completion timestamp
    pub fn with_completed_at(mut self, completed_at: impl Into<String>) -> Self {
        self.completed_at = Some(completed_at.into());
        self
    }

    /// A snapshot is terminal iff its progress is exactly 100
    pub fn is_terminal(&self) -> bool {
        self.progress == Self::COMPLETE
    }

    /// Whether the free-text status names a failure
    pub fn reports_failure(&self) -> bool {
        ["failed", "error"]
            .iter()
            .any(|s| self.status.eq_ignore_ascii_case(s))
    }
}
