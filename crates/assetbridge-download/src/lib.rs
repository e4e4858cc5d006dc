//! AssetBridge Downloader
//!
//! Streams a resolved file URL into host storage:
//! - Bounded by a single timeout covering the whole transfer
//! - Written to a temp sibling and renamed into place on success
//! - SHA-256 of the written bytes
//! - No partial file left behind on any failure

mod download;
mod downloader;
mod error;

pub use download::{sanitize_file_name, Download};
pub use downloader::{Downloader, DEFAULT_TIMEOUT};
pub use error::DownloadError;

pub type Result<T> = std::result::Result<T, DownloadError>;
