use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::llm_client::GeneratorSettings;

const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub generator: GeneratorSettings,
    /// Upload size limit in bytes.
    pub max_file_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = GeneratorSettings::default();
        let temperature: f32 = env_or("LLM_TEMPERATURE", defaults.temperature)?;
        ensure!(
            (0.0..=1.0).contains(&temperature),
            "LLM_TEMPERATURE must be between 0.0 and 1.0, got {temperature}"
        );

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 3000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            generator: GeneratorSettings {
                model: std::env::var("LLM_MODEL").unwrap_or(defaults.model),
                max_tokens: env_or("LLM_MAX_TOKENS", defaults.max_tokens)?,
                temperature,
                timeout: Duration::from_secs(env_or(
                    "LLM_TIMEOUT_SECS",
                    defaults.timeout.as_secs(),
                )?),
            },
            max_file_size: env_or("MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `key` if set, otherwise returns `default`.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}
