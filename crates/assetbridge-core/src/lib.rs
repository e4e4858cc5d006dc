//! AssetBridge Core
//!
//! Repository adapter that lets a host search a remote DAM and copy the
//! selected files into its own storage. Configuration is injected once at
//! construction; every call is otherwise stateless.

mod adapter;
mod config;
mod error;
mod fields;
mod listing;
mod repository;

pub use adapter::AssetSearchAdapter;
pub use config::{Config, SecretString};
pub use error::RepositoryError;
pub use fields::{option_names, ConfigField, FieldKind, CONFIG_FIELDS};
pub use listing::{
    FetchResult, Listing, ListingFlags, Reference, SearchResultItem, RESULT_AUTHOR, WILDCARD,
};
pub use repository::{FileTypes, Repository, ReturnType, SearchForm};

// Re-export wire and download layers
pub use assetbridge_api::{ApiError, DamClient, Query};
pub use assetbridge_download::{Download, DownloadError, Downloader};

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
