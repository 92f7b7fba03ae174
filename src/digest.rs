//! SHA-256 helpers
//!
//! All hashes in hookgate are SHA-256 rendered as 64 lowercase hex digits.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of a hex-rendered SHA-256 digest
pub const HEX_DIGEST_LEN: usize = 64;

/// Hash bytes and render as lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Hash several byte slices as one contiguous input
pub fn sha256_hex_parts(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    format!("{:x}", hasher.finalize())
}

/// Whether `s` is a 64-digit lowercase hex string
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == HEX_DIGEST_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Constant-time digest comparison
pub fn digests_equal(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
