//! Streaming downloader

use futures_util::StreamExt;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;
use uuid::Uuid;

use crate::download::Download;
use crate::error::DownloadError;
use crate::Result;

/// Default bound on a whole file transfer
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
    timeout: Duration,
}

impl Downloader {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Download `url` to `target`, replacing any existing file.
    ///
    /// On failure neither the temp file nor `target` exists afterwards.
    pub async fn download_to(&self, url: &str, target: &Path) -> Result<Download> {
        let parsed =
            Url::parse(url).map_err(|e| DownloadError::InvalidUrl(format!("{}: {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(DownloadError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = temp_path(target);
        let result = match tokio::time::timeout(self.timeout, self.stream_to(parsed, &temp)).await
        {
            Ok(result) => result,
            Err(_) => Err(DownloadError::Timeout(self.timeout)),
        };

        let result = match result {
            Ok(download) => match tokio::fs::rename(&temp, target).await {
                Ok(()) => Ok(Download {
                    path: target.to_path_buf(),
                    ..download
                }),
                Err(e) => Err(e.into()),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(download) => {
                tracing::info!(
                    url = %download.url,
                    path = %download.path.display(),
                    bytes = download.bytes,
                    "Completed download"
                );
                Ok(download)
            }
            Err(e) => {
                discard(&temp).await;
                discard(target).await;
                tracing::warn!(url = %url, error = %e, "Download failed");
                Err(e)
            }
        }
    }

    async fn stream_to(&self, url: Url, temp: &Path) -> Result<Download> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        let expected = response.content_length();

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(temp)
            .await?;

        let mut hasher = Sha256::new();
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DownloadError::Network(e.to_string()))?;
            file.write_all(&chunk).await?;
            hasher.update(&chunk);
            written = written.saturating_add(chunk.len() as u64);
        }

        file.flush().await?;
        file.sync_all().await?;

        if let Some(expected) = expected {
            if written != expected {
                return Err(DownloadError::Network(format!(
                    "transfer ended after {} of {} bytes",
                    written, expected
                )));
            }
        }

        Ok(Download {
            url: url.to_string(),
            path: temp.to_path_buf(),
            bytes: written,
            sha256: hex::encode(hasher.finalize()),
        })
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Hidden sibling of `target` that receives the bytes in flight
fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download");
    target.with_file_name(format!(".{}.{}.part", name, Uuid::new_v4().simple()))
}

async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove file"),
    }
}
