//! Repository error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("DAM API error: {0}")]
    Api(#[from] assetbridge_api::ApiError),

    #[error("Invalid reference: {0:?}")]
    InvalidReference(String),

    #[error("Error while downloading: {0}")]
    Download(#[from] assetbridge_download::DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),
}
