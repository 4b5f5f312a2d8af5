//! Error types for CBE Assist.

use std::time::Duration;

/// Top-level error type for the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session-store errors.
///
/// `Pool`, `Query`, and `Migration` are retryable from the caller's point of
/// view — the store makes no promise that a failed write went through.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Session not found: {phone} on {channel}")]
    NotFound { phone: String, channel: String },

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Failed to send on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("Invalid message format: {0}")]
    InvalidMessage(String),

    #[error("Gateway rejected message for {phone}: {reason}")]
    GatewayRejected { phone: String, reason: String },
}

/// Advisor (free-text Q&A collaborator) errors.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("Advisor request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Advisor timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Advisor not configured")]
    NotConfigured,
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
