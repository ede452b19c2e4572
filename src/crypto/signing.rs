//! # Digital Signatures Module
//!
//! Ed25519 signatures over arbitrary messages.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SIGN / VERIFY                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────────┐                               │
//! │  │   Message    │   │ SigningPrivateKey│                               │
//! │  └──────┬───────┘   └────────┬─────────┘                               │
//! │         └─────────┬──────────┘                                          │
//! │                   ▼                                                     │
//! │        generate_signature()  ──►  Signature (64 bytes, deterministic)  │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌─────────────────┐            │
//! │  │   Message    │   │  Signature   │   │ SigningPublicKey│            │
//! │  └──────┬───────┘   └──────┬───────┘   └────────┬────────┘            │
//! │         └──────────────────┼────────────────────┘                      │
//! │                            ▼                                            │
//! │                 verify_signature()  ──►  true / false                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Verification answers a yes/no question and returns `bool`. A malformed
//! public key, an empty key and a bad signature all verify as `false`.

use ed25519_dalek::{Signature as Ed25519Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::crypto::keys::{SigningPrivateKey, SigningPublicKey};
use crate::crypto::SIGNATURE_LEN;
use crate::error::{Error, Result};

/// An Ed25519 signature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "crate::crypto::hex_serde")] pub [u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice (must be exactly 64 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_LEN] =
            slice.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: SIGNATURE_LEN,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Generate a fresh Ed25519 key pair
///
/// ## Returns
///
/// `(public, private)`
pub fn generate_signing_key_pair() -> Result<(SigningPublicKey, SigningPrivateKey)> {
    let private = SigningPrivateKey::generate()?;
    let public = private.public_key()?;
    Ok((public, private))
}

/// Sign a message
///
/// Ed25519 is deterministic: the same key and message always give the same
/// signature.
///
/// ## Errors
///
/// `EmptyKey` if the key was wiped or never set.
pub fn generate_signature(private: &SigningPrivateKey, message: &[u8]) -> Result<Signature> {
    let signing_key = SigningKey::from_bytes(private.private_bytes()?);
    Ok(Signature(signing_key.sign(message).to_bytes()))
}

/// Verify a signature
///
/// ## Returns
///
/// `true` only if `signature` is a valid signature of `message` under
/// `public`.
pub fn verify_signature(public: &SigningPublicKey, message: &[u8], signature: &Signature) -> bool {
    let Some(bytes) = public.as_bytes() else {
        return false;
    };
    let verifying_key = match VerifyingKey::from_bytes(bytes) {
        Ok(key) => key,
        Err(_) => {
            tracing::debug!("Rejecting signature under malformed public key");
            return false;
        }
    };

    let sig = Ed25519Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &sig).is_ok()
}

impl SigningPrivateKey {
    /// Shorthand for [`generate_signature`]
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        generate_signature(self, message)
    }
}

impl SigningPublicKey {
    /// Shorthand for [`verify_signature`]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        verify_signature(self, message, signature)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SIGN_PRIV: &str = "b18e1d0045995ec3d010c387ccfeb984d783af8fbb0f40fa7db126d889f6dadd";
    const SIGN_PUB: &str = "77f48b59caeda77751ed138b0ec667ff50f8768c25d48309a8f386a2bad187fb";
    const MESSAGE: &str = "916c7d1d268fc0e77c1bef238432573c39be577bbea0998936add2b50a653171\
                           ce18a542b0b7f96c1691a3be6031522894a8634183eda38798a0c5d5d79fbd01\
                           dd04a8646d71873b77b221998a81922d8105f892316369d5224c9983372d2313\
                           c6b1f4556ea26ba49d46e8b561e0fc76633ac9766e68e21fba7edca93c4c7460\
                           376d7f3ac22ff372c18f613f2ae2e856af40";
    const EXPECTED: &str = "6bd710a368c1249923fc7a1610747403040f0cc30815a00f9ff548a896bbda0b\
                            4eb2ca19ebcf917f0f34200a9edbad3901b64ab09cc5ef7b9bcc3c40c0ff7509";

    fn vector_keys() -> (SigningPublicKey, SigningPrivateKey) {
        let mut private = SigningPrivateKey::new();
        private.set_from_hex_encoded_string(SIGN_PRIV).unwrap();
        let mut public = SigningPublicKey::new();
        public.set_from_hex_encoded_string(SIGN_PUB).unwrap();
        (public, private)
    }

    #[test]
    fn test_known_vector() {
        let (public, private) = vector_keys();
        assert!(private.matches_public_key(&public));

        let message = hex::decode(MESSAGE).unwrap();
        let signature = generate_signature(&private, &message).unwrap();
        assert_eq!(signature.to_hex(), EXPECTED);
        assert!(verify_signature(&public, &message, &signature));
    }

    #[test]
    fn test_bit_flips_fail_verification() {
        let (public, private) = vector_keys();
        let mut message = hex::decode(MESSAGE).unwrap();
        let mut signature = private.sign(&message).unwrap();

        message[5] ^= 1;
        assert!(!public.verify(&message, &signature));
        message[5] ^= 1;
        assert!(public.verify(&message, &signature));

        signature.0[20] ^= 1;
        assert!(!public.verify(&message, &signature));
    }

    #[test]
    fn test_sign_verify_generated() {
        let (public, private) = generate_signing_key_pair().unwrap();
        let signature = private.sign(b"Hello, World!").unwrap();
        assert!(public.verify(b"Hello, World!", &signature));
        assert!(!public.verify(b"Hello, World?", &signature));
    }

    #[test]
    fn test_deterministic_signatures() {
        let (_, private) = generate_signing_key_pair().unwrap();
        assert_eq!(private.sign(b"same").unwrap(), private.sign(b"same").unwrap());
    }

    #[test]
    fn test_wrong_key_fails() {
        let (_, alice) = generate_signing_key_pair().unwrap();
        let (bob_pub, _) = generate_signing_key_pair().unwrap();
        let signature = alice.sign(b"message").unwrap();
        assert!(!bob_pub.verify(b"message", &signature));
    }

    #[test]
    fn test_empty_keys() {
        let (public, private) = generate_signing_key_pair().unwrap();
        let signature = private.sign(b"message").unwrap();

        assert_eq!(SigningPrivateKey::new().sign(b"message"), Err(Error::EmptyKey));
        assert!(!SigningPublicKey::new().verify(b"message", &signature));

        let mut wiped = public.clone();
        wiped.wipe();
        assert!(!wiped.verify(b"message", &signature));
    }

    #[test]
    fn test_signature_from_slice() {
        assert!(Signature::from_slice(&[0u8; 64]).is_ok());
        assert!(matches!(
            Signature::from_slice(&[0u8; 63]),
            Err(Error::InvalidKeyLength { expected: 64, actual: 63 })
        ));
    }

    #[test]
    fn test_signature_serialization() {
        let (_, private) = generate_signing_key_pair().unwrap();
        let signature = private.sign(b"serde").unwrap();

        let json = serde_json::to_string(&signature).unwrap();
        let restored: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(signature, restored);
    }
}
