use std::env;
use std::time::Duration;

use anyhow::{Context, bail};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.together.xyz/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistral-7b-instruct";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, sourced from the environment at startup.
///
/// The upstream API key has no default and must be provided; it is kept out of
/// `Debug` output and log lines.
#[derive(Clone)]
pub struct Config {
    pub bind_addr: String,
    pub upstream_url: String,
    pub api_key: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("UPSTREAM_API_KEY")
            .context("UPSTREAM_API_KEY must be set")?;
        if api_key.trim().is_empty() {
            bail!("UPSTREAM_API_KEY must not be empty");
        }

        let request_timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .with_context(|| format!("invalid UPSTREAM_TIMEOUT_SECS: {raw}"))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.into()),
            api_key,
            model: env::var("UPSTREAM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            request_timeout,
        })
    }
}
