//! Completed download record

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Download {
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
    /// Lowercase hex SHA-256 of the file contents
    pub sha256: String,
}

/// Reduce a caller-supplied name to a bare file name.
///
/// Directory components are dropped so the result always lands inside the
/// storage directory.
pub fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name.trim())
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        "download".to_string()
    } else {
        name.to_string()
    }
}
