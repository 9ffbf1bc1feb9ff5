//! Error types for twilio-mock.

use thiserror::Error;

/// Result type alias for twilio-mock operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in twilio-mock.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to bind to address.
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    /// Failed to serialize a response body.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Area code is not exactly three ASCII digits.
    #[error("invalid area code {0:?}: expected exactly three digits")]
    InvalidAreaCode(String),

    /// Every test number for a prefix has already been issued.
    #[error("no unused test numbers left for prefix {0}")]
    NumbersExhausted(String),

    /// Identifier does not follow the two-letter prefix + 32 characters shape.
    #[error("invalid SID: {0:?}")]
    InvalidSid(String),

    /// A stub arrangement lacks a field the response needs.
    #[error("{resource} stub is missing required attribute `{field}`")]
    MissingAttribute {
        resource: &'static str,
        field: &'static str,
    },

    /// Requests reached the server without a matching stub.
    #[error("{} request(s) matched no stub: {}", .0.len(), .0.join(", "))]
    UnmatchedRequests(Vec<String>),
}
