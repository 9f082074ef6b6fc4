//! WebSocket message types: envelope and client commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped with the current time.
    #[must_use]
    pub fn new(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message with a numeric code.
    #[must_use]
    pub fn error(id: String, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands a client can send in the payload of a `command` message.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to booking activity of specific events.
    Subscribe {
        /// Event ids to follow. `"*"` follows every event.
        event_ids: Vec<SubscriptionTarget>,
    },
    /// Stop following specific events.
    Unsubscribe {
        /// Event ids to drop.
        event_ids: Vec<SubscriptionTarget>,
    },
}

/// One entry of a subscribe/unsubscribe list: a numeric id or `"*"`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SubscriptionTarget {
    /// A single event id.
    Event(i64),
    /// The wildcard `"*"`.
    Wildcard(Wildcard),
}

/// The literal `"*"`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum Wildcard {
    /// Matches every event.
    #[serde(rename = "*")]
    All,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_with_ids_and_wildcard() {
        let json = r#"{"command":"subscribe","event_ids":[1,"*",7]}"#;
        let Ok(cmd) = serde_json::from_str::<WsCommand>(json) else {
            panic!("command should parse");
        };
        assert_eq!(
            cmd,
            WsCommand::Subscribe {
                event_ids: vec![
                    SubscriptionTarget::Event(1),
                    SubscriptionTarget::Wildcard(Wildcard::All),
                    SubscriptionTarget::Event(7),
                ]
            }
        );
    }

    #[test]
    fn rejects_unknown_command() {
        let json = r#"{"command":"book","event_ids":[1]}"#;
        assert!(serde_json::from_str::<WsCommand>(json).is_err());
    }

    #[test]
    fn envelope_uses_type_key() {
        let msg = WsMessage::error(String::new(), 400, "malformed JSON");
        let json = serde_json::to_string(&msg).unwrap_or_default();
        assert!(json.contains("\"type\":\"error\""));
    }
}
