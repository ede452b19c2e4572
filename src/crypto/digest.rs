//! # Digests
//!
//! SHA-256 digests and HMAC-SHA256 message authentication codes.
//!
//! Key exchange runs its raw X25519 output through [`generate_sha256_digest`]
//! so callers never see an unhashed curve point.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::crypto::SHA256_DIGEST_LEN;

type HmacSha256 = Hmac<Sha256>;

/// A 32-byte SHA-256 digest or HMAC-SHA256 tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Digest(#[serde(with = "crate::crypto::hex_serde")] pub [u8; SHA256_DIGEST_LEN]);

impl Sha256Digest {
    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SHA256_DIGEST_LEN] {
        &self.0
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compare against another digest without an early exit on mismatch
    pub fn ct_eq(&self, other: &Sha256Digest) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl AsRef<[u8]> for Sha256Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Compute the SHA-256 digest of `data`
pub fn generate_sha256_digest(data: &[u8]) -> Sha256Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Sha256Digest(hasher.finalize().into())
}

/// Compute HMAC-SHA256 of `data` under `key`
///
/// HMAC accepts keys of any length.
pub fn generate_hmac256(data: &[u8], key: &[u8]) -> Sha256Digest {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC takes keys of any size"));
    mac.update(data);
    Sha256Digest(mac.finalize().into_bytes().into())
}

/// Check an HMAC-SHA256 tag in constant time
pub fn verify_hmac256(data: &[u8], key: &[u8], tag: &Sha256Digest) -> bool {
    generate_hmac256(data, key).ct_eq(tag)
}

// ============================================================================
// TESTS
// ============================================================================
