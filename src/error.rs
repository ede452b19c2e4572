//! # Error Handling
//!
//! This module provides the error type shared by every primitive in the crate.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Capacity Errors                                                   │
//! │  │   └── BufferTooSmall        - Output buffer cannot hold the result  │
//! │  │                                                                      │
//! │  ├── Format Errors                                                     │
//! │  │   ├── InvalidEncoding       - Bad hex/base64 (prefix was written)   │
//! │  │   ├── DecodeTruncated       - Decode ran out of output space        │
//! │  │   ├── InvalidKeyFormat      - Key text could not be parsed          │
//! │  │   ├── UnsupportedKeyType    - Key file holds another algorithm      │
//! │  │   └── EncryptedKeyFile      - Key file is passphrase protected      │
//! │  │                                                                      │
//! │  ├── Crypto Errors                                                     │
//! │  │   ├── EncryptionFailed      - Cipher could not produce output       │
//! │  │   ├── DecryptionFailed      - Bad padding or authentication tag     │
//! │  │   ├── RngFailed             - OS random source unavailable          │
//! │  │   ├── EmptyKey              - Key was wiped or never set            │
//! │  │   └── KeyExchangeFailed     - Peer key gave a degenerate secret     │
//! │  │                                                                      │
//! │  └── Contract Errors                                                   │
//! │      ├── InvalidKeyLength      - Wrong fixed-size key length           │
//! │      └── InvalidIvLength       - Wrong fixed-size IV length            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signature verification and public-key matching are *not* errors. They
//! return `bool`. Everything else reports failure through [`Result`].

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Capacity Errors (100-199)
    // ========================================================================

    /// The caller-supplied output buffer is too small
    #[error("Output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required for the full result
        needed: usize,
        /// Bytes the caller provided
        available: usize,
    },

    // ========================================================================
    // Format Errors (200-299)
    // ========================================================================

    /// Malformed text input; `decoded` bytes were written before the failure
    #[error("Invalid {encoding} input after {decoded} decoded bytes")]
    InvalidEncoding {
        /// Which codec rejected the input
        encoding: &'static str,
        /// Bytes successfully written to the output before the failure
        decoded: usize,
    },

    /// Decoding stopped because the output buffer filled up
    #[error("Decode output truncated after {decoded} bytes")]
    DecodeTruncated {
        /// Bytes successfully written to the output
        decoded: usize,
    },

    /// Key text or binary key data could not be parsed
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// Key file describes an algorithm other than the expected one
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// Key file is protected with a passphrase
    #[error("Encrypted key files are not supported")]
    EncryptedKeyFile,

    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (bad padding, bad tag, wrong key)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Random number generation failed
    #[error("Random number generation failed")]
    RngFailed,

    /// Operation needs key material but the key is empty (wiped or unset)
    #[error("Key is empty")]
    EmptyKey,

    /// Key exchange produced the all-zero secret (low-order peer key)
    #[error("Key exchange failed: peer public key is not contributory")]
    KeyExchangeFailed,

    // ========================================================================
    // Contract Errors (400-499)
    // ========================================================================

    /// A fixed-size key had the wrong length
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// A fixed-size IV had the wrong length
    #[error("Invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Capacity
    /// - 200-299: Format
    /// - 300-399: Crypto
    /// - 400-499: Contract violations
    pub fn code(&self) -> i32 {
        match self {
            // Capacity (100-199)
            Error::BufferTooSmall { .. } => 100,

            // Format (200-299)
            Error::InvalidEncoding { .. } => 200,
            Error::DecodeTruncated { .. } => 201,
            Error::InvalidKeyFormat(_) => 202,
            Error::UnsupportedKeyType(_) => 203,
            Error::EncryptedKeyFile => 204,

            // Crypto (300-399)
            Error::EncryptionFailed(_) => 300,
            Error::DecryptionFailed(_) => 301,
            Error::RngFailed => 302,
            Error::EmptyKey => 303,
            Error::KeyExchangeFailed => 304,

            // Contract (400-499)
            Error::InvalidKeyLength { .. } => 400,
            Error::InvalidIvLength { .. } => 401,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Capacity errors can be retried with a larger buffer. Contract
    /// violations are programming errors and are never recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::BufferTooSmall { .. } | Error::DecodeTruncated { .. } | Error::RngFailed
        )
    }

    /// Bytes written before a decode failure, if this is a decode error
    ///
    /// Partial output from a failed base64 decode is still valid data and
    /// callers that want it can recover the count here.
    pub fn decoded_len(&self) -> Option<usize> {
        match self {
            Error::InvalidEncoding { decoded, .. } | Error::DecodeTruncated { decoded } => {
                Some(*decoded)
            }
            _ => None,
        }
    }
}

impl From<rand::Error> for Error {
    fn from(_: rand::Error) -> Self {
        Error::RngFailed
    }
}

// ============================================================================
// TESTS
// ============================================================================
