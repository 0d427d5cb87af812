//! HAL link DTOs

use serde::{Deserialize, Serialize};

/// A response body carrying a `_links.notification.href` path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksEnvelope {
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Links {
    pub notification: Link,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl LinksEnvelope {
    /// Last non-empty path segment of the notification href
    pub fn notification_id(&self) -> Option<&str> {
        let href = self.links.notification.href.as_str();
        let path = href.split(['?', '#']).next().unwrap_or(href);
        path.rsplit('/').find(|segment| !segment.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(href: &str) -> LinksEnvelope {
        LinksEnvelope {
            links: Links {
                notification: Link {
                    href: href.to_string(),
                },
            },
        }
    }

    #[test]
    fn test_notification_id_from_href() {
        let body = r#"{
            "message": "Caches are being cleared.",
            "_links": {
                "self": { "href": "https://cloud.example.com/api/environments/24-a47ac10b/domains/example.com/actions/clear-caches" },
                "notification": { "href": "https://cloud.example.com/api/notifications/42b56cff-0b55-4bdf-a949-1fd0fca61c6c" }
            }
        }"#;
        let parsed: LinksEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.notification_id(),
            Some("42b56cff-0b55-4bdf-a949-1fd0fca61c6c")
        );
    }

    #[test]
    fn test_notification_id_ignores_trailing_slash_and_query() {
        assert_eq!(
            envelope("https://host/api/notifications/abc/?expand=1").notification_id(),
            Some("abc")
        );
        assert_eq!(envelope("").notification_id(), None);
    }

    #[test]
    fn test_missing_notification_link_is_rejected() {
        let body = r#"{ "_links": { "self": { "href": "https://host/api" } } }"#;
        assert!(serde_json::from_str::<LinksEnvelope>(body).is_err());
    }
}
