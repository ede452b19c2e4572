//! # Key Exchange
//!
//! X25519 Diffie-Hellman. The raw curve output is never handed out; callers
//! receive its SHA-256 digest as a [`SharedSecret`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY EXCHANGE                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   Alice                                           Bob                   │
//! │   ─────                                           ───                   │
//! │   generate_key_exchange_key_pair()                generate_...()        │
//! │        │                                               │                │
//! │        │  ──────────── public key ────────────────►    │                │
//! │        │  ◄─────────── public key ─────────────────    │                │
//! │        ▼                                               ▼                │
//! │   X25519(a, B)                                    X25519(b, A)          │
//! │        │                                               │                │
//! │        ▼                                               ▼                │
//! │   SHA-256(raw)          ══════ equal ══════       SHA-256(raw)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use subtle::ConstantTimeEq;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::digest::generate_sha256_digest;
use crate::crypto::keys::{ExchangePrivateKey, ExchangePublicKey};
use crate::crypto::SHA256_DIGEST_LEN;
use crate::error::{Error, Result};

/// The hashed result of an X25519 exchange
///
/// Zeroized on drop. Equality is constant-time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHA256_DIGEST_LEN],
}

impl SharedSecret {
    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SHA256_DIGEST_LEN] {
        &self.bytes
    }

    /// Zero the secret
    pub fn wipe(&mut self) {
        self.bytes.zeroize();
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.bytes[..].ct_eq(&other.bytes[..]).into()
    }
}

impl Eq for SharedSecret {}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Generate a fresh X25519 key pair
///
/// ## Returns
///
/// `(public, private)`, where the private scalar is clamped per RFC 7748
/// and the public key is derived from it.
pub fn generate_key_exchange_key_pair() -> Result<(ExchangePublicKey, ExchangePrivateKey)> {
    let private = ExchangePrivateKey::generate()?;
    let public = private.public_key()?;
    Ok((public, private))
}

/// Compute the shared secret between our private key and a peer's public key
///
/// ## Returns
///
/// `SHA-256(X25519(private, public))`. Both sides of an exchange arrive at
/// the same value.
///
/// ## Errors
///
/// - `EmptyKey` if either key is empty
/// - `KeyExchangeFailed` if the peer key is a low-order point and the raw
///   output is all zero
pub fn perform_key_exchange(
    private: &ExchangePrivateKey,
    public: &ExchangePublicKey,
) -> Result<SharedSecret> {
    let scalar = StaticSecret::from(*private.private_bytes()?);
    let peer = X25519PublicKey::from(public.to_bytes()?);

    let raw = scalar.diffie_hellman(&peer);
    if !raw.was_contributory() {
        tracing::warn!("Key exchange rejected non-contributory peer key");
        return Err(Error::KeyExchangeFailed);
    }

    let digest = generate_sha256_digest(raw.as_bytes());
    Ok(SharedSecret { bytes: digest.0 })
}

impl ExchangePrivateKey {
    /// Shorthand for [`perform_key_exchange`]
    pub fn key_exchange(&self, their_public: &ExchangePublicKey) -> Result<SharedSecret> {
        perform_key_exchange(self, their_public)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7748 section 6.1
    const ALICE_PRIV: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
    const ALICE_PUB: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a";
    const BOB_PRIV: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
    const BOB_PUB: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
    // SHA-256 of the RFC's raw shared secret 4a5d9d5b...161742
    const SHARED_DIGEST: &str = "dead45a1d43d6902aa9240b43c0d75a0b5fc750660590d6d45461cbfc4010684";

    fn private_key(priv_hex: &str) -> ExchangePrivateKey {
        let mut key = ExchangePrivateKey::new();
        key.set_from_hex_encoded_string(priv_hex).unwrap();
        key
    }

    fn public_key(pub_hex: &str) -> ExchangePublicKey {
        let mut key = ExchangePublicKey::new();
        key.set_from_hex_encoded_string(pub_hex).unwrap();
        key
    }

    #[test]
    fn test_rfc7748_vector() {
        let alice = private_key(ALICE_PRIV);
        let bob = private_key(BOB_PRIV);
        let alice_pub = public_key(ALICE_PUB);
        let bob_pub = public_key(BOB_PUB);

        assert!(alice.matches_public_key(&alice_pub));
        assert!(bob.matches_public_key(&bob_pub));

        let s1 = perform_key_exchange(&alice, &bob_pub).unwrap();
        let s2 = perform_key_exchange(&bob, &alice_pub).unwrap();
        assert_eq!(s1, s2);
        assert_eq!(hex::encode(s1.as_bytes()), SHARED_DIGEST);
    }

    #[test]
    fn test_generated_pairs_agree() {
        let (alice_pub, alice) = generate_key_exchange_key_pair().unwrap();
        let (bob_pub, bob) = generate_key_exchange_key_pair().unwrap();

        assert!(alice.matches_public_key(&alice_pub));
        assert_eq!(
            alice.key_exchange(&bob_pub).unwrap(),
            bob.key_exchange(&alice_pub).unwrap()
        );
    }

    #[test]
    fn test_different_peers_different_secrets() {
        let (_, alice) = generate_key_exchange_key_pair().unwrap();
        let (bob_pub, _) = generate_key_exchange_key_pair().unwrap();
        let (carol_pub, _) = generate_key_exchange_key_pair().unwrap();

        assert_ne!(
            perform_key_exchange(&alice, &bob_pub).unwrap(),
            perform_key_exchange(&alice, &carol_pub).unwrap()
        );
    }

    #[test]
    fn test_empty_keys_rejected() {
        let (bob_pub, bob) = generate_key_exchange_key_pair().unwrap();
        let empty_priv = ExchangePrivateKey::new();
        let empty_pub = ExchangePublicKey::new();

        assert_eq!(perform_key_exchange(&empty_priv, &bob_pub), Err(Error::EmptyKey));
        assert_eq!(perform_key_exchange(&bob, &empty_pub), Err(Error::EmptyKey));
    }

    #[test]
    fn test_low_order_peer_rejected() {
        let (_, alice) = generate_key_exchange_key_pair().unwrap();
        let zero = ExchangePublicKey::from_bytes([0u8; 32]);
        assert_eq!(perform_key_exchange(&alice, &zero), Err(Error::KeyExchangeFailed));
    }

    #[test]
    fn test_shared_secret_wipe() {
        let (bob_pub, alice) = {
            let (_, alice) = generate_key_exchange_key_pair().unwrap();
            let (bob_pub, _) = generate_key_exchange_key_pair().unwrap();
            (bob_pub, alice)
        };
        let mut secret = alice.key_exchange(&bob_pub).unwrap();
        let copy = secret.clone();
        secret.wipe();
        assert_eq!(secret.as_bytes(), &[0u8; 32]);
        assert_ne!(secret, copy);
        assert_eq!(format!("{:?}", copy), "SharedSecret(<redacted>)");
    }
}
