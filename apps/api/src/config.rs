use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Default deadline for a single model call.
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 20;
const MAX_LLM_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Hard deadline handed to the bounded model invoker.
    pub llm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: parse_llm_timeout(std::env::var("LLM_TIMEOUT_SECS").ok().as_deref())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_llm_timeout(raw: Option<&str>) -> Result<Duration> {
    let secs = match raw {
        None => DEFAULT_LLM_TIMEOUT_SECS,
        Some(s) => s
            .trim()
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
    };
    if secs == 0 || secs > MAX_LLM_TIMEOUT_SECS {
        bail!("LLM_TIMEOUT_SECS must be between 1 and {MAX_LLM_TIMEOUT_SECS}, got {secs}");
    }
    Ok(Duration::from_secs(secs))
}
