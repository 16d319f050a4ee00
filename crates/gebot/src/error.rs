//! Error types for bot operations

use thiserror::Error;

/// Bot specific errors
#[derive(Debug, Error)]
pub enum BotError {
    /// Requested item, player or page does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: u16,
    },

    /// Transport level failure
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response did not match the expected schema
    #[error("Parse error: {0}")]
    ParseFailed(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Not enough observations to compute an indicator
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Malformed upstream URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Missing or unusable command arguments
    #[error("Command error: {0}")]
    CommandError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error while reading local configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification used when rendering failures to users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    FetchFailure,
    ParseFailure,
    InsufficientData,
    Usage,
    Configuration,
}

impl BotError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Status { status: 404, .. } => ErrorKind::NotFound,
            Self::Status { .. }
            | Self::FetchFailed(_)
            | Self::NetworkError(_)
            | Self::InvalidUrl(_)
            | Self::Io(_)
            | Self::Other(_) => ErrorKind::FetchFailure,
            Self::ParseFailed(_) | Self::JsonError(_) => ErrorKind::ParseFailure,
            Self::InsufficientData(_) => ErrorKind::InsufficientData,
            Self::CommandError(_) => ErrorKind::Usage,
            Self::ConfigError(_) => ErrorKind::Configuration,
        }
    }

    /// Whether the upstream reported the subject as missing
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;
