//! Taskwait HTTP Client
//!
//! A small, type-safe HTTP client for the notifications endpoint of the
//! remote API. Every long-running operation the API starts is tracked by a
//! notification, and this client reads one back as a [`StatusSnapshot`].
//!
//! # Example
//!
//! ```no_run
//! use taskwait_client::NotificationsClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = NotificationsClient::new("http://localhost:8080/api");
//!
//!     let snapshot = client
//!         .get_notification("42b56cff-0b55-4bdf-a949-1fd0fca61c6c")
//!         .await?;
//!
//!     println!("{} is {}% complete", snapshot.label, snapshot.progress);
//!     Ok(())
//! }
//! ```

pub mod error;
mod notifications;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use taskwait_core::StatusSnapshot;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the notifications API
#[derive(Debug, Clone)]
pub struct NotificationsClient {
    /// Base URL of the API (e.g., "https://cloud.example.com/api")
    base_url: String,
    /// Bearer token sent with every request, if any
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl NotificationsClient {
    /// Client for the API rooted at `base_url`, e.g. `https://cloud.example.com/api`
    ///
    /// Notifications are read from `{base_url}/notifications/{uuid}`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Same as [`NotificationsClient::new`], over a preconfigured `reqwest` client
    ///
    /// A trailing `/` on `base_url` is dropped.
    ///
    /// ```
    /// use std::time::Duration;
    /// use taskwait_client::NotificationsClient;
    ///
    /// # fn main() -> Result<(), reqwest::Error> {
    /// let http = reqwest::Client::builder()
    ///     .connect_timeout(Duration::from_secs(3))
    ///     .build()?;
    /// let client = NotificationsClient::with_client("https://cloud.example.com/api/", http);
    /// assert_eq!(client.base_url(), "https://cloud.example.com/api");
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Sends `token` as a bearer credential on every notification lookup
    ///
    /// Obtaining the token is the caller's business.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Decodes a 2xx body; any other status becomes [`ClientError::ApiError`]
    /// carrying the raw body text
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::ParseError(e.to_string()))
    }
}
