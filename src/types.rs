use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound chat body. `message` is lenient on purpose: a syntactically valid
/// body without the field must reach the "Message is required" branch, not the
/// malformed-JSON branch.
#[derive(Debug, Deserialize)]
pub struct ChatReq {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResp {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrResp {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrResp {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Value) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_field_is_optional() {
        let req: ChatReq = serde_json::from_value(json!({})).unwrap();
        assert!(req.message.is_none());
    }

    #[test]
    fn null_message_parses_as_absent() {
        let req: ChatReq = serde_json::from_value(json!({ "message": null })).unwrap();
        assert!(req.message.is_none());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let req: ChatReq =
            serde_json::from_value(json!({ "message": "hi", "model": "gpt-4o" })).unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
    }

    #[test]
    fn error_without_details_serializes_flat() {
        let body = serde_json::to_value(ErrResp::new("Invalid request")).unwrap();
        assert_eq!(body, json!({ "error": "Invalid request" }));
    }

    #[test]
    fn error_with_details_keeps_raw_payload() {
        let body = serde_json::to_value(ErrResp::with_details(
            "Invalid API response",
            json!({ "error": "bad request" }),
        ))
        .unwrap();
        assert_eq!(body["details"]["error"], "bad request");
    }
}
