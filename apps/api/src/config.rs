use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::retry::RetryMode;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded once from environment variables at startup.
/// Malformed values fail startup; a missing LLM API key does not (requests report it).
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub retry_mode: RetryMode,
    pub request_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_retries: u32 = parse_or(&lookup, "LLM_MAX_RETRIES", 3)?;
        if max_retries == 0 {
            bail!("LLM_MAX_RETRIES must be at least 1");
        }

        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }

        let retry_mode = match lookup("LLM_RETRY_MODE") {
            Some(raw) => raw
                .parse::<RetryMode>()
                .with_context(|| format!("LLM_RETRY_MODE has invalid value '{raw}'"))?,
            None => RetryMode::default(),
        };

        Ok(Config {
            llm_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            llm_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            llm_model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_retries,
            retry_base_delay: Duration::from_millis(parse_or(
                &lookup,
                "LLM_RETRY_BASE_DELAY_MS",
                1000,
            )?),
            retry_mode,
            request_timeout: Duration::from_secs(timeout_secs),
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
