//! Configuration module for the Dispoma client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Dispoma REST API, without trailing slash
    pub api_url: String,
    /// Bearer token used by the command-line binary
    pub api_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("DISPOMA_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_token = env::var("DISPOMA_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs = match env::var("DISPOMA_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid DISPOMA_TIMEOUT_SECS {:?}, using {}",
                    raw,
                    DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let log_level = env::var("DISPOMA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = env::var("DISPOMA_LOG_FORMAT")
            .ok()
            .and_then(|f| LogFormat::from_str(&f))
            .unwrap_or(LogFormat::Text);

        Self {
            api_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
            log_level,
            log_format,
        }
    }
}
