//! DAM-backed repository adapter

use async_trait::async_trait;
use std::path::PathBuf;

use assetbridge_api::{DamClient, Query};
use assetbridge_download::{sanitize_file_name, Downloader};

use crate::config::Config;
use crate::fields::{self, ConfigField, CONFIG_FIELDS};
use crate::listing::{FetchResult, Listing, ListingFlags, Reference, SearchResultItem, WILDCARD};
use crate::repository::{FileTypes, Repository, ReturnType};
use crate::Result;

/// Searches the DAM and copies picked files into host storage.
///
/// Holds only read-only configuration and HTTP clients, so one instance can
/// serve any number of sequential calls.
#[derive(Debug, Clone)]
pub struct AssetSearchAdapter {
    config: Config,
    client: DamClient,
    downloader: Downloader,
}

impl AssetSearchAdapter {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = DamClient::new(
            config.api_base_url.clone(),
            config.api_user.clone(),
            config.api_key.expose(),
            config.request_timeout(),
        )?;
        let downloader = Downloader::new(config.download_timeout());

        tracing::info!(
            api_base_url = %config.api_base_url,
            api_user = %config.api_user,
            "Created DAM repository adapter"
        );

        Ok(Self {
            config,
            client,
            downloader,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_fields() -> &'static [ConfigField] {
        CONFIG_FIELDS
    }

    pub fn option_names() -> Vec<&'static str> {
        fields::option_names()
    }

    /// Search query for `text`, unsigned
    pub fn build_search_query(&self, text: &str) -> Query {
        self.client.search_query(text)
    }

    /// Resolve query for `reference`, unsigned
    pub fn build_resolve_query(&self, reference: &Reference) -> Query {
        self.client
            .resolve_query(reference.external_id(), reference.file_extension())
    }

    pub fn sign(&self, query: &Query) -> String {
        assetbridge_api::sign(self.config.api_key.expose(), &query.to_string())
    }

    /// Target path for `filename` in storage, with any previous file removed
    pub async fn prepare_file(&self, filename: &str) -> Result<PathBuf> {
        let dir = &self.config.storage_dir;
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(sanitize_file_name(filename));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Replacing existing file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(path)
    }

    fn flags(&self, is_search_result: bool) -> ListingFlags {
        ListingFlags {
            refresh_disabled: true,
            login_disabled: true,
            is_search_result,
            help_url: self.config.help_link(),
        }
    }
}

#[async_trait]
impl Repository for AssetSearchAdapter {
    fn list(&self, _path: &str, _page: u32) -> Listing {
        Listing::new(Vec::new(), self.flags(false))
    }

    async fn search(&self, text: Option<&str>, page: u32) -> Result<Listing> {
        let text = text.filter(|t| !t.trim().is_empty()).unwrap_or(WILDCARD);
        tracing::debug!(text = %text, page, "Searching DAM");

        let items: Vec<SearchResultItem> = self
            .client
            .search(text)
            .await?
            .into_items()
            .into_iter()
            .filter_map(|preview| {
                let resource_ref = preview.resource_ref.clone();
                match SearchResultItem::from_preview(preview) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(resource_ref = %resource_ref, error = %e, "Skipping result");
                        None
                    }
                }
            })
            .collect();

        tracing::info!(text = %text, results = items.len(), "Search completed");

        Ok(Listing::new(items, self.flags(true)))
    }

    async fn fetch(&self, reference: &str, filename: &str) -> Result<FetchResult> {
        let reference: Reference = reference.parse()?;

        let url = self
            .client
            .resolve_path(reference.external_id(), reference.file_extension())
            .await?;
        tracing::debug!(reference = %reference, url = %url, "Resolved file URL");

        let path = self.prepare_file(filename).await?;
        let download = self.downloader.download_to(&url, &path).await?;

        tracing::info!(
            reference = %reference,
            path = %download.path.display(),
            bytes = download.bytes,
            "Fetched file"
        );

        Ok(FetchResult {
            local_path: download.path,
            resolved_source_url: url,
            bytes: download.bytes,
            sha256: download.sha256,
        })
    }

    fn supported_file_types(&self) -> FileTypes {
        FileTypes::Any
    }

    fn supports_global_search(&self) -> bool {
        false
    }

    fn return_type(&self) -> ReturnType {
        ReturnType::InternalCopy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> AssetSearchAdapter {
        AssetSearchAdapter::new(Config::new(
            "https://dam.example.com/api/?",
            "admin",
            "s3cret",
        ))
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(AssetSearchAdapter::new(Config::new("", "admin", "k")).is_err());
    }

    #[test]
    fn test_list_placeholder() {
        let listing = adapter().list("", 0);
        assert!(listing.is_empty());
        assert!(listing.flags.refresh_disabled);
        assert!(listing.flags.login_disabled);
        assert!(!listing.flags.is_search_result);
        assert_eq!(listing.flags.help_url, None);
    }

    #[test]
    fn test_list_with_help() {
        let config = Config::new("https://dam.example.com/api/?", "admin", "k")
            .with_help("https://help.example.com");
        let listing = AssetSearchAdapter::new(config).unwrap().list("/any", 3);
        assert_eq!(
            listing.flags.help_url.as_deref(),
            Some("https://help.example.com")
        );
    }

    #[test]
    fn test_help_enabled_with_empty_url() {
        let config = Config::new("https://dam.example.com/api/?", "admin", "k").with_help("");
        let listing = AssetSearchAdapter::new(config).unwrap().list("", 0);
        assert_eq!(listing.flags.help_url.as_deref(), Some(""));
    }

    #[test]
    fn test_queries_and_signature() {
        let adapter = adapter();

        let search = adapter.build_search_query("cat photo");
        assert_eq!(search.get("param1"), Some("cat+photo"));
        assert_eq!(search.get("user"), Some("admin"));

        let reference: Reference = "12,jpg".parse().unwrap();
        let resolve = adapter.build_resolve_query(&reference);
        assert_eq!(resolve.get("param1"), Some("12"));
        assert_eq!(resolve.get("param5"), Some("jpg"));

        assert_eq!(
            adapter.sign(&resolve),
            assetbridge_api::sign("s3cret", &resolve.to_string())
        );
        assert_ne!(adapter.sign(&resolve), adapter.sign(&search));
    }

    #[test]
    fn test_capabilities() {
        let adapter = adapter();
        assert_eq!(adapter.supported_file_types().to_string(), "*");
        assert!(!adapter.supports_global_search());
        assert_eq!(adapter.return_type(), ReturnType::InternalCopy);
        assert_eq!(adapter.search_form().field_name, "s");
        assert_eq!(AssetSearchAdapter::option_names().len(), 5);
    }

    #[tokio::test]
    async fn test_prepare_file() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = AssetSearchAdapter::new(
            Config::new("https://dam.example.com/api/?", "admin", "k")
                .with_storage_dir(dir.path().join("store")),
        )
        .unwrap();

        let existing = dir.path().join("store").join("out.jpg");
        std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
        std::fs::write(&existing, b"old").unwrap();

        let path = adapter.prepare_file("../out.jpg").await.unwrap();
        assert_eq!(path, existing);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_fetch_invalid_reference() {
        let result = adapter().fetch("12jpg", "out.jpg").await;
        assert!(matches!(
            result,
            Err(crate::RepositoryError::InvalidReference(_))
        ));
    }
}
