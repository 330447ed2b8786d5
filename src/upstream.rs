use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Serialize)]
struct UpstreamPayload<'a> {
    model: &'a str,
    messages: [Turn<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Turn<'a> {
    role: &'static str,
    content: &'a str,
}

/// Shape-validated outcome of one completion call.
#[derive(Debug)]
pub enum Completion {
    /// `choices[0].message.content` was present and a string.
    Content(String),
    /// The body was JSON but the choices path was absent or malformed; carries
    /// the raw body for diagnosis.
    MissingChoices(Value),
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned a non-JSON body")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct UpstreamClient {
    client: Client,
    url: String,
    model: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            url: config.upstream_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Sends the message as a single user turn. Issues exactly one request;
    /// timeouts surface as `Transport` errors.
    pub async fn complete(&self, message: &str) -> Result<Completion, UpstreamError> {
        let payload = UpstreamPayload {
            model: &self.model,
            messages: [Turn {
                role: "user",
                content: message,
            }],
        };

        debug!("forwarding request to URL: {}", self.url);

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        // The upstream reports its own failures in the body, so the status
        // code is not consulted; any body without a choices path comes back
        // as MissingChoices.
        let text = resp.text().await?;
        let raw: Value = serde_json::from_str(&text)
            .map_err(|source| UpstreamError::Decode { body: text, source })?;

        Ok(decode(raw))
    }
}

fn decode(raw: Value) -> Completion {
    match raw
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        Some(content) => Completion::Content(content.to_owned()),
        None => Completion::MissingChoices(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_choice_content_is_extracted() {
        let raw = json!({ "choices": [{ "message": { "content": "hi" } }] });
        match decode(raw) {
            Completion::Content(c) => assert_eq!(c, "hi"),
            other => panic!("expected content, got {other:?}"),
        }
    }

    #[test]
    fn missing_choices_keeps_raw_body() {
        let raw = json!({ "error": "bad request" });
        match decode(raw) {
            Completion::MissingChoices(v) => assert_eq!(v["error"], "bad request"),
            other => panic!("expected missing choices, got {other:?}"),
        }
    }

    #[test]
    fn empty_choices_array_is_invalid() {
        let raw = json!({ "choices": [] });
        assert!(matches!(decode(raw), Completion::MissingChoices(_)));
    }

    #[test]
    fn non_string_content_is_invalid() {
        let raw = json!({ "choices": [{ "message": { "content": 42 } }] });
        assert!(matches!(decode(raw), Completion::MissingChoices(_)));
    }
}
