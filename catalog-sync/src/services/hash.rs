use md5::{Digest, Md5};

const SHORT_HASH_LEN: usize = 8;

/// First 8 hex chars of MD5 over `text`.
///
/// Matches ledgers written by the earlier Python sync script.
pub fn short_hash(text: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    let mut hex = hex::encode(result);
    hex.truncate(SHORT_HASH_LEN);
    hex
}
