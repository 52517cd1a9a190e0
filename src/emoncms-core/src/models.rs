use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MESSAGE_KEY: &str = "message";
pub const SUCCESS_KEY: &str = "success";
pub const UUID_KEY: &str = "uuid";

/// Human-readable phrase for the statuses emoncms is known to answer with
pub fn status_phrase(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("invalid request"),
        401 => Some("unauthorized access"),
        404 => Some("Not found"),
        406 => Some("URI not acceptable"),
        _ => None,
    }
}

/// Diagnostic for a non-200 answer: `error <status>` plus the known phrase, if any
pub fn status_message(status: u16) -> String {
    match status_phrase(status) {
        Some(phrase) => format!("error {} {}", status, phrase),
        None => format!("error {}", status),
    }
}

/// Text form of a JSON value, without quotes around strings
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// RequestResult is the single shape returned by every network call
///
/// On success `message` holds the JSON payload. On failure it holds a
/// diagnostic string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResult {
    pub success: bool,
    pub message: Value,
}

impl RequestResult {
    pub fn ok(message: Value) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Value::String(message.into()),
        }
    }

    pub fn into_payload(self) -> Option<Value> {
        self.success.then_some(self.message)
    }

    /// The diagnostic string of a failed result
    pub fn error_message(&self) -> Option<&str> {
        if self.success {
            None
        } else {
            self.message.as_str()
        }
    }
}

/// Body of a 200 answer, classified by shape
///
/// Feed routes answer with bare arrays or objects, user routes wrap their
/// answer in `{success, message}`, and routes missing on older servers
/// answer with a bare `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Plain(Value),
    Envelope {
        success: Option<bool>,
        message: Value,
    },
}

impl Payload {
    pub fn inspect(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.contains_key(MESSAGE_KEY) => {
                let success = map.get(SUCCESS_KEY).and_then(Value::as_bool);
                let message = map.remove(MESSAGE_KEY).unwrap_or(Value::Null);
                Payload::Envelope { success, message }
            }
            other => Payload::Plain(other),
        }
    }

    /// The value callers care about: the envelope's `message`, or the whole body
    pub fn into_value(self) -> Value {
        match self {
            Payload::Plain(value) => value,
            Payload::Envelope { message, .. } => message,
        }
    }

    /// True for an envelope the server marked `success: false`
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Payload::Envelope {
                success: Some(false),
                ..
            }
        )
    }
}

/// Feed is a time-series channel as reported by the server
///
/// The object is kept opaque apart from `id` and the `uuid` decoration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feed(Map<String, Value>);

impl Feed {
    pub fn id(&self) -> Option<String> {
        self.0.get("id").map(render_value)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.0.get(UUID_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Namespace the feed with the account uuid as `<uuid>_<id>`
    ///
    /// Returns false and leaves the feed untouched when it carries no `id`.
    pub fn set_uuid(&mut self, account_uuid: &str) -> bool {
        match self.id() {
            Some(id) => {
                self.0.insert(
                    UUID_KEY.to_string(),
                    Value::String(format!("{}_{}", account_uuid, id)),
                );
                true
            }
            None => false,
        }
    }
}

impl From<Map<String, Value>> for Feed {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_message_known_phrases() {
        assert_eq!(status_message(400), "error 400 invalid request");
        assert_eq!(status_message(401), "error 401 unauthorized access");
        assert_eq!(status_message(404), "error 404 Not found");
        assert_eq!(status_message(406), "error 406 URI not acceptable");
    }

    #[test]
    fn test_status_message_unknown_status() {
        assert_eq!(status_message(500), "error 500");
        assert_eq!(status_message(302), "error 302");
        assert_eq!(status_phrase(503), None);
    }

    #[test]
    fn test_inspect_bare_false_is_plain() {
        let payload = Payload::inspect(json!(false));
        assert_eq!(payload, Payload::Plain(json!(false)));
        assert!(!payload.is_failure());
        assert_eq!(payload.into_value(), json!(false));
    }

    #[test]
    fn test_inspect_array_is_plain() {
        let feeds = json!([{"id": "1"}, {"id": "2"}]);
        assert_eq!(Payload::inspect(feeds.clone()).into_value(), feeds);
    }

    #[test]
    fn test_inspect_object_without_message_is_plain() {
        let feed = json!({"id": "1", "name": "power"});
        assert_eq!(
            Payload::inspect(feed.clone()),
            Payload::Plain(feed.clone())
        );
    }

    #[test]
    fn test_inspect_success_envelope_unwraps() {
        let payload = Payload::inspect(json!({"success": true, "message": "abc"}));
        assert!(!payload.is_failure());
        assert_eq!(payload.into_value(), json!("abc"));
    }

    #[test]
    fn test_inspect_envelope_without_success_unwraps() {
        let payload = Payload::inspect(json!({"message": {"a": 1}}));
        assert!(!payload.is_failure());
        assert_eq!(payload.into_value(), json!({"a": 1}));
    }

    #[test]
    fn test_inspect_failure_envelope() {
        let payload = Payload::inspect(json!({"success": false, "message": "Feed does not exist"}));
        assert!(payload.is_failure());
        assert_eq!(payload.into_value(), json!("Feed does not exist"));
    }

    #[test]
    fn test_request_result_accessors() {
        let ok = RequestResult::ok(json!([1, 2]));
        assert_eq!(ok.error_message(), None);
        assert_eq!(ok.into_payload(), Some(json!([1, 2])));

        let failed = RequestResult::failure("error 404 Not found");
        assert!(!failed.success);
        assert_eq!(failed.error_message(), Some("error 404 Not found"));
        assert_eq!(failed.into_payload(), None);
    }

    #[test]
    fn test_feed_set_uuid_string_id() {
        let mut feed: Feed = serde_json::from_value(json!({"id": "1", "name": "t"})).unwrap();
        assert!(feed.set_uuid("abc"));
        assert_eq!(feed.uuid(), Some("abc_1"));
        assert_eq!(feed.get("name"), Some(&json!("t")));
    }

    #[test]
    fn test_feed_set_uuid_numeric_id() {
        let mut feed: Feed = serde_json::from_value(json!({"id": 42})).unwrap();
        assert!(feed.set_uuid("abc"));
        assert_eq!(feed.uuid(), Some("abc_42"));
    }

    #[test]
    fn test_feed_without_id_is_not_decorated() {
        let mut feed = Feed::default();
        assert!(!feed.set_uuid("abc"));
        assert_eq!(feed.uuid(), None);
    }

    #[test]
    fn test_feed_serializes_transparently() {
        let raw = json!({"id": "1", "value": 17.69});
        let feed: Feed = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&feed).unwrap(), raw);
    }
}
