//! Provider error types.

use std::fmt;

/// Which upstream provider a call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Bus,
    Train,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Bus => f.write_str("bus"),
            ProviderKind::Train => f.write_str("train"),
        }
    }
}

/// Failures talking to a provider at the HTTP level.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failure, timeout, or other request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the JSON we expected
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

impl TransportError {
    /// Whether the request was abandoned because it took too long.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Http(e) if e.is_timeout())
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        TransportError::Json {
            message: message.into(),
            body: None,
        }
    }
}

/// Errors from a provider client call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider returned a well-formed envelope reporting an error.
    #[error("{message}")]
    Upstream { message: String },

    /// The call could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ProviderError {
    pub(crate) fn upstream(message: impl Into<String>) -> Self {
        ProviderError::Upstream {
            message: message.into(),
        }
    }
}
