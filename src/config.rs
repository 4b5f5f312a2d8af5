//! Configuration types — everything is read from the environment once at
//! startup and handed to the collaborators that need it.

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the webhook server binds to.
    pub bind_addr: SocketAddr,
    /// Path to the libSQL database file.
    pub db_path: String,
    /// How long to wait for the advisor before falling back.
    pub advisor_timeout: Duration,
    /// Whether to run the stdin/stdout test channel alongside the server.
    pub cli_channel: bool,
}

impl AppConfig {
    /// Build from environment variables, with defaults suitable for local runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr: SocketAddr = std::env::var("CBE_ASSIST_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "CBE_ASSIST_BIND".to_string(),
                message: format!("{e}"),
            })?;

        let db_path = std::env::var("CBE_ASSIST_DB_PATH")
            .unwrap_or_else(|_| "./data/cbe-assist.db".to_string());

        let advisor_timeout_secs: u64 = std::env::var("CBE_ASSIST_ADVISOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "CBE_ASSIST_ADVISOR_TIMEOUT_SECS".to_string(),
                message: format!("{e}"),
            })?;

        let cli_channel = std::env::var("CBE_ASSIST_CLI")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            db_path,
            advisor_timeout: Duration::from_secs(advisor_timeout_secs),
            cli_channel,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 8080).into(),
            db_path: "./data/cbe-assist.db".to_string(),
            advisor_timeout: Duration::from_secs(8),
            cli_channel: false,
        }
    }
}

/// Configuration for the LLM-backed advisor. Absent when no API key is set —
/// the engine then answers free-text questions with the fixed fallback.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_key: SecretString,
    pub model: String,
}

impl AdvisorConfig {
    /// Build from `ANTHROPIC_API_KEY` / `CBE_ASSIST_MODEL`, or `None` if no
    /// key is configured.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").ok()?;
        let model = std::env::var("CBE_ASSIST_MODEL")
            .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());
        Some(Self {
            api_key: SecretString::from(api_key),
            model,
        })
    }
}

/// Configuration for the outbound SMS gateway. Absent when the gateway
/// credentials are not set — replies are then delivered inline in the
/// webhook response only.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub username: String,
    pub api_key: SecretString,
    /// Registered sender ID / short code.
    pub sender_id: Option<String>,
    /// API base URL — overridable for the sandbox environment.
    pub base_url: String,
}

impl GatewayConfig {
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("AT_USERNAME").ok()?;
        let api_key = std::env::var("AT_API_KEY").ok()?;
        let sender_id = std::env::var("AT_SENDER_ID").ok();
        let base_url = std::env::var("AT_BASE_URL")
            .unwrap_or_else(|_| "https://api.africastalking.com".to_string());
        Some(Self {
            username,
            api_key: SecretString::from(api_key),
            sender_id,
            base_url,
        })
    }
}
