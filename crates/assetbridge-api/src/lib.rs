//! AssetBridge DAM API
//!
//! Wire contract of the remote asset service:
//! - Ordered query construction (`search_get_previews`, `get_resource_path`)
//! - Shared-secret signing: `hex(sha256(key ++ query))`
//! - Response decoding, including the non-array "no results" quirk

mod client;
mod encode;
mod error;
mod query;
mod response;
mod sign;

pub use client::DamClient;
pub use encode::encode;
pub use error::ApiError;
pub use query::{Query, QueryParam, PREVIEW_SIZES, RESOLVE_FUNCTION, SEARCH_FUNCTION};
pub use response::{parse_modified, parse_resolved_url, ResourcePreview, SearchResponse};
pub use sign::sign;

pub type Result<T> = std::result::Result<T, ApiError>;
