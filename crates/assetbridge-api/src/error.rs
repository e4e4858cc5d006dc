//! API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("DAM returned HTTP {status} for {function}")]
    Status { function: String, status: u16 },

    #[error("Malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}
