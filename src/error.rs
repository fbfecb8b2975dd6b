//! Error types for the rolecert application.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.
//! Configuration errors are `anyhow` at the loading edge; everything network-facing
//! lives in the two enums here.

use thiserror::Error;

/// Credential-exchange and token-cache errors.
///
/// An exchange failure is fatal to the pipeline that triggered it; there is
/// no retry at this layer.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token exchange failed: HTTP {status}")]
    ExchangeFailed { status: u16 },

    #[error("Token exchange failed: {0}")]
    ExchangeTransport(String),

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    #[error("Failed to load cached token: {0}")]
    CacheLoad(String),

    #[error("Failed to persist token: {0}")]
    CacheStore(String),
}

/// Governance API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Unauthorized (401): token may be expired")]
    Unauthorized,

    #[error("Forbidden (403): insufficient permissions")]
    Forbidden,

    #[error("Unexpected status: HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Map a non-success response status to the matching error variant.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            _ => Self::UnexpectedStatus { status },
        }
    }

    /// The HTTP status behind this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }
}
