//! Configuration module
//!
//! Handles CLI configuration shared by every command.

use taskwait_client::NotificationsClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API serving notifications
    pub api_url: String,

    /// Bearer token sent with every request
    pub api_token: Option<String>,
}

impl Config {
    /// Builds the notifications client for this configuration
    pub fn client(&self) -> NotificationsClient {
        let client = NotificationsClient::new(&self.api_url);
        match &self.api_token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_api_url() {
        let config = Config {
            api_url: "https://cloud.example.com/api/".to_string(),
            api_token: Some("secret".to_string()),
        };
        assert_eq!(config.client().base_url(), "https://cloud.example.com/api");
    }
}
