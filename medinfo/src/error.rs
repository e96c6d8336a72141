//! Error taxonomy shared by the API client, session service, and storage.
//!
//! ERROR HANDLING
//! ==============
//! Every remote failure is normalized into [`ApiError`] regardless of cause so
//! callers can render `{message, status, errors}` uniformly. A `401` is lifted
//! into its own variant because it carries session-wide consequences.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Fallback message when neither the server nor the transport says anything.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Failure to produce any HTTP response at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Client-side credential storage failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing storage is not reachable (no window, private mode, missing file).
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
    /// Writing a value was rejected (quota exceeded, I/O error).
    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },
    /// The stored admin profile could not be serialized.
    #[error("failed to encode admin profile: {0}")]
    Encode(String),
}

/// Normalized failure of a remote API call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{0}")]
    Network(String),
    /// Non-2xx response, with the server-provided message when there is one.
    #[error("{message}")]
    Remote {
        status: u16,
        message: String,
        errors: Option<Value>,
    },
    /// The server answered `401`; persisted credentials have been cleared.
    #[error("{message}")]
    SessionExpired { message: String },
    /// 2xx response missing the fields the caller needs.
    #[error("{0}")]
    Malformed(String),
    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Human-readable message for display.
    #[must_use]
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_owned()
        } else {
            message
        }
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::SessionExpired { .. } => Some(401),
            Self::Network(_) | Self::Malformed(_) | Self::Encode(_) => None,
        }
    }

    /// Per-field error details reported by the server.
    #[must_use]
    pub fn errors(&self) -> Option<&Value> {
        match self {
            Self::Remote { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }

    /// Whether this failure invalidated the session.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        Self::Network(value.0)
    }
}
