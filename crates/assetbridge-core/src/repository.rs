//! Host-facing repository contract

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::listing::{FetchResult, Listing};
use crate::Result;

/// File types a repository can offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FileTypes {
    Any,
}

impl fmt::Display for FileTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTypes::Any => f.write_str("*"),
        }
    }
}

/// How a picked file reaches the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    /// Copied into host storage
    InternalCopy,
}

/// Search box the host renders above the file picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchForm {
    pub field_name: &'static str,
    pub placeholder: &'static str,
}

impl SearchForm {
    pub fn render_html(&self) -> String {
        format!(
            r#"<input class="form-control" id="reposearch" name="{}" placeholder="{}" type="search">"#,
            self.field_name, self.placeholder
        )
    }
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            field_name: "s",
            placeholder: "Search",
        }
    }
}

/// A file source the host can list, search and copy from.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Browse `path`. Repositories without a hierarchy return a placeholder.
    fn list(&self, path: &str, page: u32) -> Listing;

    /// Search for files. `None` means match everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote service cannot be queried.
    async fn search(&self, text: Option<&str>, page: u32) -> Result<Listing>;

    /// Copy the file identified by `reference` into host storage as `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed references and failed transfers.
    async fn fetch(&self, reference: &str, filename: &str) -> Result<FetchResult>;

    fn search_form(&self) -> SearchForm {
        SearchForm::default()
    }

    fn supported_file_types(&self) -> FileTypes;

    /// Whether the host may include this repository in cross-repository search
    fn supports_global_search(&self) -> bool;

    fn return_type(&self) -> ReturnType;
}
