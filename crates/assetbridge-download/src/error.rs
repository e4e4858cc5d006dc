//! Download error types

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with HTTP {0}")]
    Status(u16),

    #[error("Download timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
