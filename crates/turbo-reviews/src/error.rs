//! Error types for the reviews widget.

use thiserror::Error;

use crate::http::FetchError;

/// Errors returned by the reviews API layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, non-2xx status).
    #[error("Transport error: {0}")]
    Transport(#[from] FetchError),

    /// The envelope carried a non-200 status code.
    #[error("Reviews API returned status {code}")]
    Status { code: u16, message: Option<String> },

    /// The envelope had no payload.
    #[error("Reviews API response had no payload")]
    MissingPayload,

    /// Failed to decode or encode a JSON body.
    #[error("JSON error: {0}")]
    Json(String),

    /// Failed to build an endpoint URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The request was superseded by a newer one.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Whether this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::InvalidUrl(e.to_string())
    }
}

/// Errors from the local key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// A get or set on the store failed.
    #[error("Store operation failed: {0}")]
    Operation(String),

    /// Failed to serialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by the widget itself.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// A required host attribute is absent or empty.
    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),

    /// Loading reviews failed.
    #[error("Failed to load reviews: {0}")]
    Load(#[source] ApiError),

    /// Submitting a review failed.
    #[error("Failed to submit review: {0}")]
    Submit(#[source] ApiError),
}
