//! Error types for express checkout

use thiserror::Error;

/// Express checkout error types
///
/// Provider-level declines are not errors: a `Failure` acknowledgement comes
/// back as a [`Response`](crate::Response) with `success == false`.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Required credential or setting missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Required per-call option absent
    #[error("Missing required parameter(s): {}", .0.join(", "))]
    MissingParameter(Vec<&'static str>),

    /// Round trip to the provider could not be completed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CheckoutError {
    /// Names of the missing parameters, if this is a `MissingParameter` error
    pub fn missing_parameters(&self) -> Option<&[&'static str]> {
        match self {
            Self::MissingParameter(keys) => Some(keys),
            _ => None,
        }
    }

    /// Whether the error was raised before any network activity
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}

/// Transport error types
#[derive(Error, Debug)]
pub enum TransportError {
    /// Underlying HTTP client error (connect, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as received
        body: String,
    },

    /// Error raised by a custom transport implementation
    #[error("Transport error: {0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        CheckoutError::Transport(TransportError::Http(err))
    }
}

/// Result type for express checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
