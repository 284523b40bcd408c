//! Error taxonomy for garden client operations.
//!
//! Every failure is user-recoverable: the caller reports it and the user
//! retries the gesture. Failures split into two classes:
//!
//! - transport-class: the request never produced a structured answer
//!   (connection failure, bare HTTP status, unreadable body);
//! - validation-class: the backend (or the store, before sending) rejected
//!   the command with a reason the user can read.
//!
//! Drift between overlapping mutations is not an error at all; it heals on
//! the next resynchronization.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Which class of failure an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Validation,
}

/// Errors produced by the garden API, store, and configuration.
#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status and no readable reason.
    #[error("request failed with status {status}")]
    Status { status: u16 },

    /// The backend rejected the command; `message` is safe to show the user.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A coordinate that is not a finite number reached a mutation.
    #[error("invalid position ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },

    /// A configuration value could not be used.
    #[error("config parse failed: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GardenError {
    /// Build a backend rejection.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected { status, message: message.into() }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_) | Self::HttpClientBuild(_) => {
                FailureKind::Transport
            }
            Self::Rejected { .. } | Self::InvalidPosition { .. } | Self::Config(_) => FailureKind::Validation,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_STATUS",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidPosition { .. } => "E_INVALID_POSITION",
            Self::Config(_) => "E_CONFIG",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether repeating the same gesture unchanged can succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599 })
    }

    /// Text to show the user in a blocking notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for GardenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
