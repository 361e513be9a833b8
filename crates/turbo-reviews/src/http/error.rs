//! Outbound HTTP errors.

use thiserror::Error;

/// Failure talking to the reviews service at the HTTP level.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never got a response.
    #[error("Request to reviews service failed: {0}")]
    Send(String),

    /// The service answered with a non-2xx status.
    #[error("Reviews service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("Undecodable response: {0}")]
    Decode(String),

    /// The request body could not be encoded.
    #[error("Unencodable request body: {0}")]
    Encode(#[from] serde_json::Error),
}
