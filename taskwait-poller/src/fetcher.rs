//! Status fetch capability
//!
//! The scheduler only needs "give me the current snapshot of this
//! operation". Anything that can answer that is a [`StatusFetcher`].

use async_trait::async_trait;
use std::sync::Arc;
use taskwait_client::NotificationsClient;
use taskwait_core::{FetchError, StatusSnapshot};

/// Retrieves one snapshot of a remote operation
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetches the current snapshot of `operation_id`
    ///
    /// A failure is final for the session; no retry happens behind this call.
    async fn fetch(&self, operation_id: &str) -> Result<StatusSnapshot, FetchError>;
}

#[async_trait]
impl StatusFetcher for NotificationsClient {
    async fn fetch(&self, operation_id: &str) -> Result<StatusSnapshot, FetchError> {
        self.get_notification(operation_id)
            .await
            .map_err(FetchError::from)
    }
}

#[async_trait]
impl<T: StatusFetcher + ?Sized> StatusFetcher for Arc<T> {
    async fn fetch(&self, operation_id: &str) -> Result<StatusSnapshot, FetchError> {
        (**self).fetch(operation_id).await
    }
}
