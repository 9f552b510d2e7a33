//! Wire types for the event service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event record as returned by the service.
///
/// Only the fields the client reads are typed; everything else is kept in
/// `extra` untouched. The id may arrive as `_id` or `id`, as a string or a
/// number; `_id` wins when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
    pub address: String,
    pub access: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Creates an event with only id and name set.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: String::new(),
            address: String::new(),
            access: String::new(),
            extra: Map::new(),
        }
    }
}

impl TryFrom<Map<String, Value>> for Event {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let underscore = fields.remove("_id");
        let plain = fields.remove("id");
        let id = underscore
            .as_ref()
            .and_then(id_text)
            .or_else(|| plain.as_ref().and_then(id_text))
            .ok_or_else(|| "event has no usable id".to_string())?;
        Ok(Self {
            id,
            name: take_text(&mut fields, "name"),
            date: take_text(&mut fields, "date"),
            address: take_text(&mut fields, "address"),
            access: take_text(&mut fields, "access"),
            extra: fields,
        })
    }
}

/// Accepts string and numeric ids.
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Removes a string field; non-string values stay in the map.
fn take_text(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(_)) => match fields.remove(key) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Body of a successful create.
///
/// Any 2xx counts as created; the body is kept as-is and the id is read
/// from it when one can be found, either at the top level or under
/// `event` / `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedEvent {
    pub id: Option<String>,
    pub body: Value,
}

impl CreatedEvent {
    pub fn from_body(body: Value) -> Self {
        let id = [&body, &body["event"], &body["data"]]
            .into_iter()
            .find_map(|v| v.get("_id").and_then(id_text).or_else(|| v.get("id").and_then(id_text)));
        Self { id, body }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accepts_underscore_id_and_keeps_extra_fields() {
        let json = r#"{
            "_id": "e1",
            "name": "Book Club",
            "date": "2024-06-05T10:00:00.000Z",
            "address": "Main St",
            "access": "Public",
            "eventType": "Social"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "e1");
        assert_eq!(event.access, "Public");
        assert_eq!(event.extra.get("eventType"), Some(&Value::from("Social")));
    }

    #[test]
    fn test_event_missing_optional_fields() {
        let event: Event = serde_json::from_str(r#"{"id":"e2","name":"Yoga"}"#).unwrap();
        assert_eq!(event, Event::named("e2", "Yoga"));
    }

    #[test]
    fn test_event_underscore_id_wins_over_id() {
        let event: Event =
            serde_json::from_str(r#"{"_id":"e1","id":"legacy","name":"Picnic"}"#).unwrap();
        assert_eq!(event.id, "e1");
        assert!(!event.extra.contains_key("id"));
    }

    #[test]
    fn test_event_numeric_id_and_missing_name() {
        let event: Event = serde_json::from_str(r#"{"_id":7,"date":20240605}"#).unwrap();
        assert_eq!(event.id, "7");
        assert_eq!(event.name, "");
        assert_eq!(event.date, "");
        assert_eq!(event.extra.get("date"), Some(&Value::from(20_240_605)));
    }

    #[test]
    fn test_event_without_id_is_rejected() {
        let err = serde_json::from_str::<Event>(r#"{"name":"Picnic"}"#).unwrap_err();
        assert!(err.to_string().contains("no usable id"));
    }

    #[test]
    fn test_created_event_finds_id_in_wrapped_body() {
        let created = CreatedEvent::from_body(serde_json::json!({
            "message": "Event created",
            "event": {"_id": "e9", "name": "Picnic"}
        }));
        assert_eq!(created.id.as_deref(), Some("e9"));

        let created = CreatedEvent::from_body(serde_json::json!({"id": 12}));
        assert_eq!(created.id.as_deref(), Some("12"));

        assert_eq!(CreatedEvent::from_body(Value::Null).id, None);
    }

    #[test]
    fn test_login_response_without_token() {
        let resp: LoginResponse = serde_json::from_str(r#"{"user":{"email":"a@b.c"}}"#).unwrap();
        assert_eq!(resp.token, None);
        assert!(resp.extra.contains_key("user"));
    }
}
