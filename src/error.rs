//! Error types for the Rainbow Six Siege statistics lookup

use thiserror::Error;


pub type Result<T> = std::result::Result<T, R6sError>;

#[derive(Error, Debug)]
pub enum R6sError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Player not found: {username}")]
    NotFound { username: String },

    #[error("{source_name} rejected the configured credentials")]
    Unauthorized { source_name: String },

    #[error("Invalid session credentials: {message}")]
    InvalidCredentials { message: String },

    #[error("{source_name} rate limit reached")]
    RateLimited { source_name: String },

    #[error("{source_name} returned HTTP {status}")]
    Upstream {
        source_name: String,
        status: u16,
        retryable: bool,
    },

    #[error("{source_name} request timed out")]
    NetworkTimeout { source_name: String },

    #[error("Malformed response from {source_name}: {message}")]
    MalformedResponse {
        source_name: String,
        message: String,
    },

    #[error("Invalid source: {name}")]
    InvalidSource { name: String },

    #[error("{source_name} cannot supply {kind} statistics")]
    UnsupportedStatKind { source_name: String, kind: String },

    #[error("{source_name} unavailable after {attempts} attempts: {last_error}")]
    SourceUnavailable {
        source_name: String,
        attempts: u32,
        last_error: String,
    },

    #[error("Invalid platform: {platform}")]
    InvalidPlatform { platform: String },

    #[error("Invalid stat kind: {kind}")]
    InvalidStatKind { kind: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

/// The two failure categories a player-facing caller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    NotFound,
    SourceUnavailable,
}

impl FailureCategory {
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureCategory::NotFound => "Player not found",
            FailureCategory::SourceUnavailable => {
                "The statistics source is temporarily unavailable, please try again later"
            }
        }
    }
}

impl R6sError {
    /// Whether the retry wrapper may call the adapter again after this failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            R6sError::RateLimited { .. } | R6sError::NetworkTimeout { .. } => true,
            R6sError::Upstream { retryable, .. } => *retryable,
            R6sError::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            _ => false,
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            R6sError::NotFound { .. } => FailureCategory::NotFound,
            _ => FailureCategory::SourceUnavailable,
        }
    }

    /// Map a transport-level reqwest failure to the taxonomy.
    pub fn from_transport(source_name: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            R6sError::NetworkTimeout {
                source_name: source_name.to_string(),
            }
        } else if err.is_decode() {
            R6sError::MalformedResponse {
                source_name: source_name.to_string(),
                message: err.to_string(),
            }
        } else {
            R6sError::Http(err)
        }
    }

    pub fn malformed(source_name: &str, message: impl Into<String>) -> Self {
        R6sError::MalformedResponse {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for R6sError {
    fn from(err: anyhow::Error) -> Self {
        R6sError::Storage {
            message: format!("{err:#}"),
        }
    }
}
