//! Runtime configuration.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file) and are validated before use.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

/// Returned when no intent matches the user's message.
pub const DEFAULT_RESPONSE: &str = "I'm here to help! 🍀 I can chat about pet care, school subjects, study techniques and much more. Try asking me about algebra, dog nutrition or exam preparation.";

/// Configuration for the rule-based responder and its actor.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ResponderConfig {
    /// Delay inserted between streamed word chunks, in milliseconds.
    #[validate(range(min = 0, max = 5000))]
    pub stream_delay_ms: u64,
    /// Fallback text when the classifier finds no intent.
    #[validate(length(min = 1))]
    pub default_response: String,
    /// Longest chat message accepted by the supervisor, in characters.
    #[validate(range(min = 1))]
    pub max_message_chars: usize,
    /// Upper bound on a single actor round-trip, in seconds.
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    /// Optional JSON file of extra knowledge entries merged at startup.
    #[serde(default)]
    pub knowledge_file: Option<PathBuf>,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            stream_delay_ms: 50,
            default_response: DEFAULT_RESPONSE.to_string(),
            max_message_chars: 4000,
            request_timeout_secs: 30,
            knowledge_file: None,
        }
    }
}

impl ResponderConfig {
    pub fn stream_delay(&self) -> Duration {
        Duration::from_millis(self.stream_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// Bunyan-style JSON records
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct TelemetryConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[validate(length(min = 1))]
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Top-level configuration for the binary.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub responder: ResponderConfig,
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Builds the configuration from `LUCKYCHAT_*` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Missing variables keep their defaults; malformed ones are rejected.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_current_env()
    }

    /// Same as [`AppConfig::from_env`] without touching `.env`.
    pub fn from_current_env() -> Result<Self, AppError> {
        let mut config = AppConfig::default();

        if let Some(value) = read_var("LUCKYCHAT_STREAM_DELAY_MS") {
            config.responder.stream_delay_ms = value.trim().parse()?;
        }
        if let Some(value) = read_var("LUCKYCHAT_DEFAULT_RESPONSE") {
            config.responder.default_response = value;
        }
        if let Some(value) = read_var("LUCKYCHAT_MAX_MESSAGE_CHARS") {
            config.responder.max_message_chars = value.trim().parse()?;
        }
        if let Some(value) = read_var("LUCKYCHAT_REQUEST_TIMEOUT_SECS") {
            config.responder.request_timeout_secs = value.trim().parse()?;
        }
        if let Some(value) = read_var("LUCKYCHAT_KNOWLEDGE_FILE") {
            config.responder.knowledge_file = Some(PathBuf::from(value));
        }
        if let Some(value) = read_var("LUCKYCHAT_LOG_LEVEL") {
            config.telemetry.log_level = value;
        }
        if let Some(value) = read_var("LUCKYCHAT_LOG_FORMAT") {
            config.telemetry.log_format = LogFormat::parse(&value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
