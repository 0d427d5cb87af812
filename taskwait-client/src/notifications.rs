//! Notification endpoints

use crate::NotificationsClient;
use crate::error::Result;
use taskwait_core::StatusSnapshot;
use tracing::debug;

impl NotificationsClient {
    /// Get the current state of a notification
    ///
    /// # Arguments
    /// * `uuid` - The notification UUID tracking the operation
    ///
    /// # Returns
    /// A fresh snapshot of the operation
    pub async fn get_notification(&self, uuid: &str) -> Result<StatusSnapshot> {
        let url = format!("{}/notifications/{}", self.base_url, uuid);
        debug!(%url, "Fetching notification");

        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }
}
