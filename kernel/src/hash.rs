//! Canonical hashing types and domain separation constants.
//!
//! Algorithm: SHA-256 for all V1 artifacts. Every prefix is null-terminated so
//! that no domain is a byte prefix of another.
//!
//! **Exactly one place defines canonical hashing.** State fingerprints and
//! report digests both route through the constants declared here.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    /// Full string in `"algorithm:hex_digest"` format.
    full: String,
    /// Byte offset of the `:` separator (cached from parse).
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the format is invalid (missing colon,
    /// empty algorithm, or empty digest).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Domain prefix for state fingerprints (explored-set identity).
pub const DOMAIN_STATE_FINGERPRINT: &[u8] = b"WAYFINDER::STATE_FINGERPRINT::V1\0";

/// Domain prefix for serialized `SearchReport` digests.
pub const DOMAIN_SEARCH_REPORT: &[u8] = b"WAYFINDER::SEARCH_REPORT::V1\0";

/// Domain prefix for serialized local-search report digests.
pub const DOMAIN_LOCAL_REPORT: &[u8] = b"WAYFINDER::LOCAL_REPORT::V1\0";

/// Domain prefix for harness run reports.
pub const DOMAIN_RUN_REPORT: &[u8] = b"WAYFINDER::RUN_REPORT::V1\0";

/// Every domain prefix in use. Extend when adding a domain.
pub const ALL_DOMAINS: [&[u8]; 4] = [
    DOMAIN_STATE_FINGERPRINT,
    DOMAIN_SEARCH_REPORT,
    DOMAIN_LOCAL_REPORT,
    DOMAIN_RUN_REPORT,
];

/// Compute the canonical hash of a byte slice with domain separation.
///
/// Hash = `sha256(domain || data)`, rendered as `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let full = format!("sha256:{}", hex::encode(hasher.finalize()));
    ContentHash { full, colon: 6 }
}
