//! # Cryptography Module
//!
//! The primitive layer: randomness, symmetric ciphers, digests, key
//! exchange, signatures and key-file formats.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CRYPTOGRAPHIC PRIMITIVES                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SYMMETRIC (symmetric.rs)                        │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  AES-256-CBC + PKCS#7                                          │   │
//! │  │  • 256-bit key, 128-bit IV (caller supplied)                   │   │
//! │  │  • Ciphertext = plaintext padded to the next 16-byte block     │   │
//! │  │                                                                 │   │
//! │  │  AES-256-GCM                                                   │   │
//! │  │  • 256-bit key, 96-bit IV (caller supplied)                    │   │
//! │  │  • Ciphertext = encrypted plaintext ‖ 128-bit tag              │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ASYMMETRIC                                      │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────────┐         ┌─────────────────┐              │   │
//! │  │  │  Exchange Key   │         │  Signing Key    │              │   │
//! │  │  │  (X25519)       │         │  (Ed25519)      │              │   │
//! │  │  │                 │         │                 │              │   │
//! │  │  │ • ECDH          │         │ • Sign          │              │   │
//! │  │  │ • SHA-256 of    │         │ • Verify        │              │   │
//! │  │  │   raw output    │         │ • OpenSSH files │              │   │
//! │  │  └─────────────────┘         └─────────────────┘              │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SUPPORT                                         │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │  • OS random source (random.rs)                                │   │
//! │  │  • SHA-256 and HMAC-SHA256 (digest.rs)                         │   │
//! │  │  • Line / block key-file formats (openssh.rs)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose | Crate |
//! |-----------|---------|-------|
//! | Ed25519 | Signing | `ed25519-dalek` |
//! | X25519 | Key Exchange | `x25519-dalek` |
//! | AES-256-CBC | Encryption | `aes` + `cbc` |
//! | AES-256-GCM | Authenticated Encryption | `aes-gcm` |
//! | SHA-256 / HMAC | Digests | `sha2` + `hmac` |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Private keys and shared secrets are zeroized on wipe and drop
//! 2. **Constant-Time Comparison**: Secret equality goes through `subtle`
//! 3. **Secure Random**: `rand::rngs::OsRng` for all randomness
//! 4. **Caller-Owned Buffers**: No function writes past the buffer it is given

mod digest;
mod exchange;
mod keys;
mod openssh;
mod random;
mod signing;
mod symmetric;

pub use digest::{generate_hmac256, generate_sha256_digest, verify_hmac256, Sha256Digest};
pub use exchange::{generate_key_exchange_key_pair, perform_key_exchange, SharedSecret};
pub use keys::{
    ExchangeCurve, ExchangePrivateKey, ExchangePublicKey, KeyKind, PrivateKey, PublicKey,
    SigningCurve, SigningPrivateKey, SigningPublicKey,
};
pub use openssh::{PEM_FOOTER, PEM_HEADER};
pub use random::{generate_random_block, random_array};
pub use signing::{generate_signature, generate_signing_key_pair, verify_signature, Signature};
pub use symmetric::{
    symmetric_auth_decrypt_in_place, symmetric_auth_decrypt_with_iv,
    symmetric_auth_encrypt_in_place, symmetric_auth_encrypt_with_iv, symmetric_decrypt_in_place,
    symmetric_decrypt_with_iv, symmetric_encrypt_in_place, symmetric_encrypt_with_iv,
};
pub use symmetric::padded_len as symmetric_padded_len;

/// Size of symmetric keys in bytes (256 bits)
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// AES block size, and the CBC IV size
pub const SYMMETRIC_BLOCK_SIZE: usize = 16;

/// AES-GCM IV size (96 bits)
pub const AUTH_IV_LEN: usize = 12;

/// AES-GCM authentication tag size
pub const AUTH_TAG_LEN: usize = 16;

/// SHA-256 output size
pub const SHA256_DIGEST_LEN: usize = 32;

/// Size of an Ed25519 signature
pub const SIGNATURE_LEN: usize = 64;

/// Size of X25519 and Ed25519 public and private keys
pub const KEY_LEN: usize = 32;

/// Serde helper for fixed-size byte arrays as lowercase hex strings
pub(crate) mod hex_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid length"))
    }
}
