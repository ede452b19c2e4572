//! # Ember Crypto
//!
//! A self-contained cryptographic primitive layer: text codecs, symmetric
//! encryption, digests, X25519 key exchange, Ed25519 signatures and
//! OpenSSH-compatible key files.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         EMBER CRYPTO MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                          crypto                                 │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │  │ Symmetric  │  │  Exchange  │  │  Signing   │  │ Key Files│  │   │
//! │  │  │            │  │            │  │            │  │          │  │   │
//! │  │  │ - AES-CBC  │  │ - X25519   │  │ - Ed25519  │  │ - Line   │  │   │
//! │  │  │ - AES-GCM  │  │ - SHA-256  │  │ - Verify   │  │ - Block  │  │   │
//! │  │  └────────────┘  └────────────┘  └────────────┘  └────┬─────┘  │   │
//! │  │                                                        │        │   │
//! │  │  ┌────────────┐  ┌────────────┐  ┌────────────┐       │        │   │
//! │  │  │  Random    │  │  Digests   │  │    Keys    │       │        │   │
//! │  │  │  (OsRng)   │  │ SHA / HMAC │  │ wipe, eq   │       │        │   │
//! │  │  └────────────┘  └────────────┘  └────────────┘       │        │   │
//! │  └────────────────────────────────────────────────────────┼────────┘   │
//! │                                                           │            │
//! │  ┌────────────────────────────────────────────────────────▼────────┐   │
//! │  │                         encoding                                │   │
//! │  │     hex (permissive decode)      base64 (line breaks, legacy)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error type shared by every operation
//! - [`encoding`] - Hex and base64 codecs over caller-supplied buffers
//! - [`crypto`] - Keys, ciphers, digests, exchange, signatures, key files
//!
//! ## Buffer Conventions
//!
//! Codec and cipher functions write into a caller-owned `&mut [u8]` and
//! return the number of bytes produced. A buffer that is too small is an
//! error, never a truncated write. Each codec has a `*_max_output` helper
//! to size buffers up front.
//!
//! ## Thread Safety
//!
//! Nothing in the crate keeps global state. All functions may be called
//! from any thread, and key values are `Send + Sync`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod crypto;
pub mod encoding;
pub mod error;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{
    ExchangePrivateKey, ExchangePublicKey, SharedSecret, Signature, SigningPrivateKey,
    SigningPublicKey,
};
pub use error::{Error, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of the crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================
