use std::fmt;

use faultline_common::{trim_params, trim_str};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{InterfaceError, Result};
use crate::format::format_params;

/// Hard cap on the number of message parameters kept after trimming.
pub const MAX_MESSAGE_PARAMS: usize = 1024;

/// A standard message: a `message` template, optional `params` for
/// formatting, and an optional `formatted` string which is the result
/// of applying `params` to `message`.
///
/// Wire shape, inbound and outbound:
///
/// ```json
/// {
///     "message": "connection lost to %s",
///     "formatted": "connection lost to db-1",
///     "params": ["db-1"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
    pub params: Vec<Value>,
    pub formatted: Option<String>,
}

impl Message {
    /// Validate and normalize an untrusted message mapping.
    ///
    /// `max_len` is the configured message length budget (see
    /// `Config::max_message_length`). A missing or empty `message` is a
    /// hard validation failure; everything else is coerced or trimmed
    /// into shape. Formatting is best-effort and never fails the call.
    pub fn from_raw(data: &Map<String, Value>, max_len: usize) -> Result<Message> {
        // Empty containers count as "no message", same as empty strings.
        let raw_message = match data.get("message") {
            None | Some(Value::Null) => return Err(InterfaceError::MissingField("message")),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(InterfaceError::MissingField("message"))
            }
            Some(Value::Array(items)) if items.is_empty() => {
                return Err(InterfaceError::MissingField("message"))
            }
            Some(Value::Object(map)) if map.is_empty() => {
                return Err(InterfaceError::MissingField("message"))
            }
            Some(value) => value,
        };

        // Clients send arbitrary structures here; serialize anything
        // that isn't already a string.
        let message = match raw_message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let message = trim_str(&message, max_len);

        let params = match data.get("params") {
            Some(Value::Array(items)) if !items.is_empty() => {
                trim_params(items.clone(), MAX_MESSAGE_PARAMS)
            }
            _ => Vec::new(),
        };

        let formatted = match data.get("formatted") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        // Best-effort enrichment: substitute params into the template.
        // Any failure leaves `formatted` absent.
        let formatted = match formatted {
            Some(f) => Some(f),
            None if message.contains('%') && !params.is_empty() => {
                match format_params(&message, &params) {
                    Some(f) => Some(trim_str(&f, max_len)),
                    None => {
                        debug!("Message params did not apply to template; leaving unformatted");
                        None
                    }
                }
            }
            None => None,
        };

        Ok(Message {
            message,
            params,
            formatted,
        })
    }

    /// Grouping key consumed by the deduplication logic downstream.
    pub fn get_hash(&self) -> Vec<String> {
        vec![self.message.clone()]
    }
}

/// Human-readable rendering: the formatted string when available,
/// the raw template otherwise.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formatted.as_deref().unwrap_or(&self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAX_LEN: usize = 1000;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_plain_message_passes_through() {
        let msg = Message::from_raw(&raw(json!({"message": "it broke"})), MAX_LEN).unwrap();
        assert_eq!(msg.message, "it broke");
        assert!(msg.params.is_empty());
        assert!(msg.formatted.is_none());
    }

    #[test]
    fn test_missing_message_rejected() {
        assert!(Message::from_raw(&raw(json!({})), MAX_LEN).is_err());
    }

    #[test]
    fn test_empty_message_rejected() {
        assert!(Message::from_raw(&raw(json!({"message": ""})), MAX_LEN).is_err());
        assert!(Message::from_raw(&raw(json!({"message": null})), MAX_LEN).is_err());
    }

    #[test]
    fn test_empty_container_message_rejected() {
        assert!(Message::from_raw(&raw(json!({"message": []})), MAX_LEN).is_err());
        assert!(Message::from_raw(&raw(json!({"message": {}})), MAX_LEN).is_err());
        // Non-empty containers still get coerced, not rejected.
        assert!(Message::from_raw(&raw(json!({"message": [1]})), MAX_LEN).is_ok());
    }

    #[test]
    fn test_non_string_message_is_json_encoded() {
        let msg =
            Message::from_raw(&raw(json!({"message": {"code": 42}})), MAX_LEN).unwrap();
        assert_eq!(msg.message, "{\"code\":42}");
    }

    #[test]
    fn test_long_message_trimmed_to_budget() {
        let long = "x".repeat(2000);
        let msg = Message::from_raw(&raw(json!({"message": long})), MAX_LEN).unwrap();
        assert_eq!(msg.message.chars().count(), MAX_LEN);
        assert!(msg.message.ends_with("..."));
    }

    #[test]
    fn test_params_substituted_into_template() {
        let msg = Message::from_raw(
            &raw(json!({"message": "hi %s", "params": ["world"]})),
            MAX_LEN,
        )
        .unwrap();
        assert_eq!(msg.formatted.as_deref(), Some("hi world"));
        assert_eq!(msg.message, "hi %s");
    }

    #[test]
    fn test_percent_without_params_left_alone() {
        let msg =
            Message::from_raw(&raw(json!({"message": "100%", "params": []})), MAX_LEN).unwrap();
        assert_eq!(msg.message, "100%");
        assert!(msg.formatted.is_none());
    }

    #[test]
    fn test_failed_substitution_is_silent() {
        let msg = Message::from_raw(
            &raw(json!({"message": "count: %d", "params": ["not-a-number"]})),
            MAX_LEN,
        )
        .unwrap();
        assert_eq!(msg.message, "count: %d");
        assert!(msg.formatted.is_none());
    }

    #[test]
    fn test_params_capped_at_limit() {
        let params: Vec<Value> = (0..2000).map(|n| json!(n)).collect();
        let msg = Message::from_raw(
            &raw(json!({"message": "flood", "params": params})),
            MAX_LEN,
        )
        .unwrap();
        assert_eq!(msg.params.len(), MAX_MESSAGE_PARAMS);
        assert_eq!(msg.params[0], json!(0));
        assert_eq!(msg.params[MAX_MESSAGE_PARAMS - 1], json!(1023));
    }

    #[test]
    fn test_supplied_formatted_kept() {
        let msg = Message::from_raw(
            &raw(json!({"message": "m %s", "params": ["x"], "formatted": "already done"})),
            MAX_LEN,
        )
        .unwrap();
        assert_eq!(msg.formatted.as_deref(), Some("already done"));
    }

    #[test]
    fn test_supplied_non_string_formatted_is_json_encoded() {
        let msg = Message::from_raw(
            &raw(json!({"message": "m", "formatted": [1, 2]})),
            MAX_LEN,
        )
        .unwrap();
        assert_eq!(msg.formatted.as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_hash_is_the_raw_template() {
        let msg = Message::from_raw(
            &raw(json!({"message": "hi %s", "params": ["world"]})),
            MAX_LEN,
        )
        .unwrap();
        assert_eq!(msg.get_hash(), vec!["hi %s".to_string()]);
    }

    #[test]
    fn test_display_prefers_formatted() {
        let msg = Message::from_raw(
            &raw(json!({"message": "hi %s", "params": ["world"]})),
            MAX_LEN,
        )
        .unwrap();
        assert_eq!(msg.to_string(), "hi world");

        let plain = Message::from_raw(&raw(json!({"message": "just this"})), MAX_LEN).unwrap();
        assert_eq!(plain.to_string(), "just this");
    }

    #[test]
    fn test_formatted_result_is_trimmed() {
        let filler = "y".repeat(990);
        let msg = Message::from_raw(
            &raw(json!({"message": format!("{filler} %s"), "params": ["zzzzzzzzzzzzzzzzzzzz"]})),
            MAX_LEN,
        )
        .unwrap();
        let formatted = msg.formatted.unwrap();
        assert_eq!(formatted.chars().count(), MAX_LEN);
        assert!(formatted.ends_with("..."));
    }

    #[test]
    fn test_wire_round_trip() {
        let msg = Message::from_raw(
            &raw(json!({"message": "hi %s", "params": ["world"]})),
            MAX_LEN,
        )
        .unwrap();
        let encoded = serde_json::to_string(&msg).unwrap();
        let decoded: Message = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, msg);
    }
}
