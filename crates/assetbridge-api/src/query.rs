//! Ordered query construction
//!
//! The DAM authenticates the query string byte-for-byte, so parameter order,
//! empty placeholders and the bare `param2` of the resolve call are all part
//! of the contract.

use std::fmt;

use crate::encode::encode;

/// Function name for a preview search
pub const SEARCH_FUNCTION: &str = "search_get_previews";
/// Function name for resolving a resource to its file URL
pub const RESOLVE_FUNCTION: &str = "get_resource_path";
/// Preview sizes requested with every search: thumbnail and screen
pub const PREVIEW_SIZES: &str = "thm,scr";

/// A single query parameter. `value` is stored already encoded; `None`
/// renders the key without `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: &'static str,
    pub value: Option<String>,
}

impl QueryParam {
    fn literal(key: &'static str, value: &str) -> Self {
        Self {
            key,
            value: Some(value.to_string()),
        }
    }

    fn encoded(key: &'static str, value: &str) -> Self {
        Self {
            key,
            value: Some(encode(value)),
        }
    }

    fn bare(key: &'static str) -> Self {
        Self { key, value: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    params: Vec<QueryParam>,
}

impl Query {
    /// `search_get_previews` for `text`, newest first, thumbnail and screen
    /// preview URLs included.
    pub fn search(user: &str, text: &str) -> Self {
        Self {
            params: vec![
                QueryParam::encoded("user", user),
                QueryParam::literal("function", SEARCH_FUNCTION),
                QueryParam::encoded("param1", text),
                QueryParam::literal("param2", ""),
                QueryParam::literal("param3", ""),
                QueryParam::literal("param4", ""),
                QueryParam::literal("param5", "-1"),
                QueryParam::literal("param6", "desc"),
                QueryParam::literal("param7", ""),
                QueryParam::literal("param8", PREVIEW_SIZES),
                QueryParam::literal("param9", ""),
            ],
        }
    }

    /// `get_resource_path` for one resource: id in `param1`, extension in
    /// `param5`.
    pub fn resolve(user: &str, resource_ref: &str, extension: &str) -> Self {
        Self {
            params: vec![
                QueryParam::encoded("user", user),
                QueryParam::literal("function", RESOLVE_FUNCTION),
                QueryParam::encoded("param1", resource_ref),
                QueryParam::bare("param2"),
                QueryParam::literal("param3", ""),
                QueryParam::literal("param4", ""),
                QueryParam::encoded("param5", extension),
                QueryParam::literal("param6", ""),
                QueryParam::literal("param7", ""),
                QueryParam::literal("param8", ""),
            ],
        }
    }

    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }

    /// Encoded value of the first parameter named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| p.value.as_deref())
    }

    pub fn function(&self) -> &str {
        self.get("function").unwrap_or_default()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            f.write_str(param.key)?;
            if let Some(value) = &param.value {
                write!(f, "={}", value)?;
            }
        }
        Ok(())
    }
}
