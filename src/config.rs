//! Environment-driven configuration for the voice form client.

use std::env;
use tracing::Level;

/// Voice API root on the recognition backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/test/voice";
/// WebSocket endpoint delivering recognition events.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws/voice";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub ws_url: String,
    pub log_level: Level,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    // *   `VOICE_API_BASE_URL`: (Optional) Voice API root. Defaults to the local backend.
    // *   `VOICE_WS_URL`: (Optional) Recognition event WebSocket URL.
    // *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file. This is useful for local development and is ignored if not present.
        dotenvy::dotenv().ok();

        let api_base_url =
            env::var("VOICE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let ws_url = env::var("VOICE_WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.to_string());

        let log_level_str = env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        Ok(Self {
            api_base_url,
            ws_url,
            log_level,
        })
    }
}
