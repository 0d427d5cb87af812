//! Notification ID resolution
//!
//! The task-wait argument is either a bare notification UUID or the JSON
//! response of the API call that started the task, in which case the UUID is
//! the last segment of `_links.notification.href`.

use anyhow::{Context, Result, anyhow};
use std::io::Read;
use taskwait_core::dto::links::LinksEnvelope;
use uuid::Uuid;

/// Argument value that means "read the input from stdin"
pub const STDIN_MARKER: &str = "-";

/// Resolve a raw task-wait argument to a notification UUID
///
/// # Errors
/// Returns an error if:
/// - The input is JSON without a `_links.notification.href` property
/// - The input, or the id taken from the href, is not a valid UUID
pub fn resolve_notification_id(input: &str) -> Result<Uuid> {
    let input = input.trim();

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(input) {
        let envelope: LinksEnvelope = serde_json::from_value(json).map_err(|_| {
            anyhow!("Input JSON must contain the _links.notification.href property.")
        })?;
        let id = envelope
            .notification_id()
            .ok_or_else(|| anyhow!("The _links.notification.href property is empty."))?;
        return validate_uuid(id);
    }

    validate_uuid(input)
}

/// Read the argument, taking it from `stdin` when it is [`STDIN_MARKER`]
pub fn read_input(argument: &str, mut stdin: impl Read) -> Result<String> {
    if argument != STDIN_MARKER {
        return Ok(argument.to_string());
    }

    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .context("Failed to read notification from standard input")?;
    Ok(input)
}

fn validate_uuid(candidate: &str) -> Result<Uuid> {
    Uuid::parse_str(candidate).map_err(|_| anyhow!("This is not a valid UUID: '{}'", candidate))
}
