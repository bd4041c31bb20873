//! State fingerprints.
//!
//! A [`Fingerprint`] is the SHA-256 digest of everything a state feeds into
//! its `Hash` implementation, prefixed with [`DOMAIN_STATE_FINGERPRINT`].
//! Because the digest is driven by `Hash`, domains get fingerprints for free
//! by deriving `Hash`; they never hand-roll byte encodings.
//!
//! Fingerprints are deterministic for a given platform: `Hash` for integer
//! types writes native-endian bytes, and `usize` length prefixes follow the
//! target pointer width.

use std::hash::{Hash, Hasher};

use sha2::{Digest, Sha256};

use crate::hash::DOMAIN_STATE_FINGERPRINT;

/// A 32-byte state digest. Totally ordered so it can key `BTreeMap`s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint any hashable value.
    #[must_use]
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        let mut hasher = FingerprintHasher::new();
        value.hash(&mut hasher);
        hasher.fingerprint()
    }

    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering (64 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Eight hex chars are enough to tell nodes apart in test output.
        write!(f, "Fingerprint({}…)", &self.to_hex()[..8])
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A `Hasher` that accumulates into SHA-256 instead of SipHash.
///
/// `finish()` is available for `Hasher` compatibility but callers that need
/// the full digest use [`FingerprintHasher::fingerprint`].
#[derive(Clone)]
pub struct FingerprintHasher {
    inner: Sha256,
}

impl FingerprintHasher {
    #[must_use]
    pub fn new() -> Self {
        let mut inner = Sha256::new();
        inner.update(DOMAIN_STATE_FINGERPRINT);
        Self { inner }
    }

    /// Consume the hasher and produce the full fingerprint.
    #[must_use]
    pub fn fingerprint(self) -> Fingerprint {
        Fingerprint(self.inner.finalize().into())
    }
}

impl Default for FingerprintHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FingerprintHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.inner.clone().finalize();
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word)
    }
}
