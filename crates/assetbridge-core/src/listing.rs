//! Listing structures handed back to the host

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use assetbridge_api::ResourcePreview;

use crate::error::RepositoryError;
use crate::Result;

/// Author shown for every result; the DAM does not report one.
pub const RESULT_AUTHOR: &str = "IA Sprog";

/// Match-all search text
pub const WILDCARD: &str = "*";

const SEPARATOR: char = ',';

/// Opaque `"{external_id},{file_extension}"` token identifying a DAM file.
///
/// It carries exactly what the resolve call needs; the download URL is not
/// known until then.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    external_id: String,
    file_extension: String,
}

impl Reference {
    pub fn new(external_id: impl Into<String>, file_extension: impl Into<String>) -> Result<Self> {
        let external_id = external_id.into();
        let file_extension = file_extension.into();

        if external_id.trim().is_empty()
            || external_id.contains(SEPARATOR)
            || file_extension.contains(SEPARATOR)
        {
            return Err(RepositoryError::InvalidReference(format!(
                "{}{}{}",
                external_id, SEPARATOR, file_extension
            )));
        }

        Ok(Self {
            external_id,
            file_extension,
        })
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.external_id, SEPARATOR, self.file_extension)
    }
}

impl FromStr for Reference {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(ext), None) if !id.trim().is_empty() => Reference::new(id, ext),
            _ => Err(RepositoryError::InvalidReference(s.to_string())),
        }
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultItem {
    #[serde(rename = "source")]
    pub reference: Reference,
    pub title: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    #[serde(rename = "preview")]
    pub preview_url: String,
    /// Epoch seconds
    #[serde(rename = "datemodified")]
    pub modified_at: Option<i64>,
    pub author: String,
}

impl SearchResultItem {
    pub fn from_preview(preview: ResourcePreview) -> Result<Self> {
        let modified_at = preview.modified_at();
        Ok(Self {
            reference: Reference::new(preview.resource_ref, preview.file_extension)?,
            title: preview.title,
            thumbnail_url: preview.thumbnail_url,
            preview_url: preview.preview_url,
            modified_at,
            author: RESULT_AUTHOR.to_string(),
        })
    }

    pub fn external_id(&self) -> &str {
        self.reference.external_id()
    }

    pub fn file_extension(&self) -> &str {
        self.reference.file_extension()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingFlags {
    #[serde(rename = "norefresh")]
    pub refresh_disabled: bool,
    #[serde(rename = "nologin")]
    pub login_disabled: bool,
    #[serde(rename = "issearchresult", skip_serializing_if = "is_false")]
    pub is_search_result: bool,
    #[serde(rename = "help", skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    #[serde(rename = "list")]
    pub items: Vec<SearchResultItem>,
    #[serde(flatten)]
    pub flags: ListingFlags,
}

impl Listing {
    pub fn new(items: Vec<SearchResultItem>, flags: ListingFlags) -> Self {
        Self { items, flags }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchResult {
    #[serde(rename = "path")]
    pub local_path: PathBuf,
    #[serde(rename = "url")]
    pub resolved_source_url: String,
    pub bytes: u64,
    pub sha256: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_round_trip() {
        let reference: Reference = "12,jpg".parse().unwrap();
        assert_eq!(reference.external_id(), "12");
        assert_eq!(reference.file_extension(), "jpg");
        assert_eq!(reference.to_string(), "12,jpg");
    }

    #[test]
    fn test_reference_without_extension() {
        let reference: Reference = "12,".parse().unwrap();
        assert_eq!(reference.file_extension(), "");
        assert_eq!(reference.to_string(), "12,");
    }

    #[test]
    fn test_invalid_references() {
        for raw in ["12jpg", "", ",jpg", "12,jpg,png", "https://dam.example.com/x.jpg"] {
            assert!(
                matches!(
                    raw.parse::<Reference>(),
                    Err(RepositoryError::InvalidReference(_))
                ),
                "{raw} should be rejected"
            );
        }
        assert!(Reference::new("1,2", "jpg").is_err());
    }

    #[test]
    fn test_item_from_preview() {
        let preview: ResourcePreview = serde_json::from_value(json!({
            "ref": "12",
            "field8": "img1",
            "url_thm": "t.jpg",
            "url_scr": "s.jpg",
            "file_extension": "jpg",
            "file_modified": "2020-01-01 00:00:00"
        }))
        .unwrap();

        let item = SearchResultItem::from_preview(preview).unwrap();
        assert_eq!(item.reference.to_string(), "12,jpg");
        assert_eq!(item.external_id(), "12");
        assert_eq!(item.title, "img1");
        assert_eq!(item.modified_at, Some(1577836800));
        assert_eq!(item.author, RESULT_AUTHOR);
    }

    #[test]
    fn test_listing_serialization() {
        let listing = Listing::new(
            Vec::new(),
            ListingFlags {
                refresh_disabled: true,
                login_disabled: true,
                is_search_result: false,
                help_url: None,
            },
        );

        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!({ "list": [], "norefresh": true, "nologin": true })
        );
    }

    #[test]
    fn test_item_serialization() {
        let item = SearchResultItem {
            reference: "7,png".parse().unwrap(),
            title: "Logo".to_string(),
            thumbnail_url: "t".to_string(),
            preview_url: "s".to_string(),
            modified_at: Some(1),
            author: RESULT_AUTHOR.to_string(),
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["source"], "7,png");
        assert_eq!(value["thumbnail"], "t");
        assert_eq!(value["datemodified"], 1);

        let back: Reference = serde_json::from_value(value["source"].clone()).unwrap();
        assert_eq!(back, item.reference);
    }
}
