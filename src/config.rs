use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::services::currency::CurrencyFormat;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "TripPlanner";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o-mini";
const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";
const PERPLEXITY_MODEL: &str = "sonar";
const AI_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for one OpenAI-compatible chat-completions provider.
#[derive(Debug, Clone)]
pub struct AiProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub jwt_secret: String,
    pub generation: Option<AiProviderConfig>,
    pub research: Option<AiProviderConfig>,
    pub ai_timeout: Duration,
    pub currency: CurrencyFormat,
}

impl AppConfig {
    /// Reads configuration from the process environment. Unset optional
    /// values fall back to defaults; an unset or empty API key disables that
    /// provider.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match non_empty("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => PORT,
        };

        let ai_timeout_secs = match non_empty("AI_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "AI_TIMEOUT_SECS",
                value,
            })?,
            None => AI_TIMEOUT_SECS,
        };

        let currency = match non_empty("CURRENCY") {
            Some(code) => CurrencyFormat::for_code(&code)
                .ok_or(ConfigError::Invalid { name: "CURRENCY", value: code })?,
            None => CurrencyFormat::default(),
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            mongodb_uri: non_empty("MONGODB_URI"),
            mongodb_database: non_empty("MONGODB_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            jwt_secret: non_empty("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            generation: provider(
                "OPENAI_API_KEY",
                "OPENAI_BASE_URL",
                OPENAI_BASE_URL,
                "OPENAI_MODEL",
                OPENAI_MODEL,
            ),
            research: provider(
                "PERPLEXITY_API_KEY",
                "PERPLEXITY_BASE_URL",
                PERPLEXITY_BASE_URL,
                "PERPLEXITY_MODEL",
                PERPLEXITY_MODEL,
            ),
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            currency,
        })
    }
}

fn provider(
    key_var: &str,
    url_var: &str,
    default_url: &str,
    model_var: &str,
    default_model: &str,
) -> Option<AiProviderConfig> {
    let api_key = non_empty(key_var)?;
    Some(AiProviderConfig {
        api_key,
        base_url: non_empty(url_var).unwrap_or_else(|| default_url.to_string()),
        model: non_empty(model_var).unwrap_or_else(|| default_model.to_string()),
    })
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
