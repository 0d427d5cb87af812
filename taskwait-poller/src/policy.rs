//! Terminality policy
//!
//! A snapshot is terminal iff `progress == 100`. The status text may still
//! say the operation failed; the policy decides whether that matters.

use taskwait_core::StatusSnapshot;

/// How to judge a terminal snapshot whose status names a failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TerminalPolicy {
    /// `progress == 100` means `Completed`, whatever the status says
    #[default]
    TrustProgress,
    /// `progress == 100` with a failure status means `Failed`
    HonorFailureStatus,
}

/// What a single snapshot means for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pending,
    Completed,
    Failed,
}

impl TerminalPolicy {
    pub fn judge(&self, snapshot: &StatusSnapshot) -> Verdict {
        if !snapshot.is_terminal() {
            return Verdict::Pending;
        }

        match self {
            Self::HonorFailureStatus if snapshot.reports_failure() => Verdict::Failed,
            _ => Verdict::Completed,
        }
    }
}
