//! Request signing

use sha2::{Digest, Sha256};

/// Sign a query string with the shared secret.
///
/// The DAM recomputes `sha256(secret ++ query)` from its own copy of the
/// secret and the received query (without the `sign` parameter) and compares
/// the lowercase hex digests.
pub fn sign(secret: &str, query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(query.as_bytes());
    hex::encode(hasher.finalize())
}
