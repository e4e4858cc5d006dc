//! DAM response decoding

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ApiError;
use crate::Result;

/// One element of a `search_get_previews` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourcePreview {
    #[serde(rename = "ref", deserialize_with = "string_or_number")]
    pub resource_ref: String,
    /// Title metadata field
    #[serde(rename = "field8", default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(rename = "url_thm", default, deserialize_with = "nullable_string")]
    pub thumbnail_url: String,
    #[serde(rename = "url_scr", default, deserialize_with = "nullable_string")]
    pub preview_url: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub file_extension: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub file_modified: String,
}

impl ResourcePreview {
    /// `file_modified` as epoch seconds
    pub fn modified_at(&self) -> Option<i64> {
        parse_modified(&self.file_modified)
    }
}

/// Decoded search response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResponse {
    Items(Vec<ResourcePreview>),
    /// The DAM answers a search with no matches with an error object instead
    /// of an empty array.
    Empty,
}

impl SearchResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(elements) => {
                let items = elements
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<std::result::Result<Vec<ResourcePreview>, _>>()?;
                Ok(SearchResponse::Items(items))
            }
            other => {
                tracing::debug!(response = %other, "Non-array search response, treating as no results");
                Ok(SearchResponse::Empty)
            }
        }
    }

    pub fn into_items(self) -> Vec<ResourcePreview> {
        match self {
            SearchResponse::Items(items) => items,
            SearchResponse::Empty => Vec::new(),
        }
    }
}

/// Decode a `get_resource_path` response, which must be a single JSON string.
pub fn parse_resolved_url(body: &[u8]) -> Result<String> {
    match serde_json::from_slice::<Value>(body)? {
        Value::String(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        other => Err(ApiError::UnexpectedResponse(format!(
            "expected a file URL, got {}",
            other
        ))),
    }
}

/// Parse the DAM's `YYYY-MM-DD HH:MM:SS` timestamps (UTC) into epoch seconds.
pub fn parse_modified(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
