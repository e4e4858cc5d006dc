//! Adapter configuration

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::RepositoryError;
use crate::Result;

const ENV_PREFIX: &str = "ASSETBRIDGE";

/// Shared secret for request signing. Never printed.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(<redacted>)")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API endpoint prefix, e.g. `https://dam.example.com/api/?`
    #[serde(default)]
    pub api_base_url: String,
    #[serde(default)]
    pub api_user: String,
    #[serde(default)]
    pub api_key: SecretString,
    /// Show a help link in listings
    #[serde(default)]
    pub help_enabled: bool,
    #[serde(default)]
    pub help_url: String,
    /// Where fetched files are copied
    #[serde(default = "Config::default_storage_dir")]
    pub storage_dir: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub download_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn new(
        api_base_url: impl Into<String>,
        api_user: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_user: api_user.into(),
            api_key: SecretString::new(api_key),
            help_enabled: false,
            help_url: String::new(),
            storage_dir: Self::default_storage_dir(),
            download_timeout_secs: default_timeout_secs(),
            request_timeout_secs: default_timeout_secs(),
        }
        .normalized()
    }

    pub fn with_help(mut self, help_url: impl Into<String>) -> Self {
        self.help_enabled = true;
        self.help_url = help_url.into().trim().to_string();
        self
    }

    pub fn with_storage_dir(mut self, storage_dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = storage_dir.into();
        self
    }

    /// Load from an optional JSON file, overridden by `ASSETBRIDGE_*`
    /// environment variables (e.g. `ASSETBRIDGE_API_KEY`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, ::config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: Option<&Path>, env: ::config::Environment) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        let config: Config = builder.add_source(env).build()?.try_deserialize()?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Check the fields the settings form marks mandatory
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(RepositoryError::Config("api_base_url is required".to_string()));
        }
        match Url::parse(&self.api_base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(RepositoryError::Config(format!(
                    "api_base_url must be http or https, got {}",
                    url.scheme()
                )))
            }
            Err(e) => {
                return Err(RepositoryError::Config(format!(
                    "api_base_url is not a valid URL: {}",
                    e
                )))
            }
        }
        if self.api_user.is_empty() {
            return Err(RepositoryError::Config("api_user is required".to_string()));
        }
        if self.api_key.is_empty() {
            return Err(RepositoryError::Config("api_key is required".to_string()));
        }
        if self.download_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(RepositoryError::Config(
                "timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Help link for listings, present whenever enabled
    pub fn help_link(&self) -> Option<String> {
        self.help_enabled.then(|| self.help_url.clone())
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn default_storage_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("AssetBridge").join("files"))
            .unwrap_or_else(|| PathBuf::from(".assetbridge/files"))
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim().to_string();
        self.api_user = self.api_user.trim().to_string();
        self.api_key = SecretString::new(self.api_key.expose().trim());
        self.help_url = self.help_url.trim().to_string();
        self
    }
}
