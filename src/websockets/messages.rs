use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::SessionSnapshot;
use crate::play::SessionIntent;

/// Message types for WebSocket communication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server
    Start,
    SelectOption,
    Advance,
    Restart,

    // Server -> Client
    Snapshot,
    Error,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub meta: Option<WebSocketMessageMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOptionPayload {
    pub option_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Create a SNAPSHOT message
    pub fn snapshot(snapshot: &SessionSnapshot) -> Self {
        Self::new(
            MessageType::Snapshot,
            serde_json::to_value(snapshot).unwrap_or_default(),
        )
    }

    /// Create an ERROR message
    pub fn error(message: impl Into<String>) -> Self {
        let payload = ErrorPayload {
            message: message.into(),
        };
        Self::new(
            MessageType::Error,
            serde_json::to_value(payload).unwrap_or_default(),
        )
    }

    /// Create a SELECT_OPTION message
    pub fn select_option(option_id: impl Into<String>) -> Self {
        let payload = SelectOptionPayload {
            option_id: option_id.into(),
        };
        Self::new(
            MessageType::SelectOption,
            serde_json::to_value(payload).unwrap_or_default(),
        )
    }

    /// Translate a client message into the intent it asks for
    pub fn into_intent(self) -> Result<SessionIntent, String> {
        match self.message_type {
            MessageType::Start => Ok(SessionIntent::Start),
            MessageType::Advance => Ok(SessionIntent::Advance),
            MessageType::Restart => Ok(SessionIntent::Restart),
            MessageType::SelectOption => {
                let payload: SelectOptionPayload = serde_json::from_value(self.payload)
                    .map_err(|e| format!("Invalid SELECT_OPTION payload: {}", e))?;
                Ok(SessionIntent::SelectOption {
                    option_id: payload.option_id,
                })
            }
            MessageType::Snapshot | MessageType::Error => Err(format!(
                "{:?} messages are sent by the server only",
                self.message_type
            )),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> WebSocketMessage {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_client_messages_map_to_intents() {
        assert_eq!(
            parse(r#"{"type": "START"}"#).into_intent(),
            Ok(SessionIntent::Start)
        );
        assert_eq!(
            parse(r#"{"type": "ADVANCE", "payload": {}}"#).into_intent(),
            Ok(SessionIntent::Advance)
        );
        assert_eq!(
            parse(r#"{"type": "RESTART"}"#).into_intent(),
            Ok(SessionIntent::Restart)
        );
        assert_eq!(
            parse(r#"{"type": "SELECT_OPTION", "payload": {"option_id": "b"}}"#).into_intent(),
            Ok(SessionIntent::SelectOption {
                option_id: "b".to_string()
            })
        );
    }

    #[test]
    fn test_select_option_without_payload_is_rejected() {
        assert!(parse(r#"{"type": "SELECT_OPTION"}"#).into_intent().is_err());
    }

    #[test]
    fn test_server_messages_are_not_intents() {
        assert!(WebSocketMessage::error("oops").into_intent().is_err());
    }

    #[test]
    fn test_message_constructors_and_serialization() {
        let e = WebSocketMessage::error("oops");
        let back: WebSocketMessage = serde_json::from_str(&e.to_json()).unwrap();
        assert_eq!(back.message_type, MessageType::Error);
        assert_eq!(back.payload["message"], "oops");

        let s = WebSocketMessage::select_option("a");
        let json: serde_json::Value = serde_json::from_str(&s.to_json()).unwrap();
        assert_eq!(json["type"], "SELECT_OPTION");
        assert_eq!(json["payload"]["option_id"], "a");
    }
}
