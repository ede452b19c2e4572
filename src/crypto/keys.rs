//! # Key Management
//!
//! Opaque value types for the two elliptic-curve key families.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  ExchangePrivateKey / ExchangePublicKey (X25519)                │   │
//! │  │  ──────────────────────────────────────────                      │   │
//! │  │  • Private: 32-byte scalar (zeroized on wipe and drop)          │   │
//! │  │  • Public:  32-byte Montgomery u-coordinate                     │   │
//! │  │  • Used for Diffie-Hellman shared secrets                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SigningPrivateKey / SigningPublicKey (Ed25519)                 │   │
//! │  │  ──────────────────────────────────────────                      │   │
//! │  │  • Private: 32-byte seed (zeroized on wipe and drop)            │   │
//! │  │  • Public:  32-byte compressed Edwards point                    │   │
//! │  │  • Used for deterministic signatures                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Both families share one representation, parameterized by a          │
//! │  zero-sized marker (ExchangeCurve / SigningCurve), so an exchange     │
//! │  key can never be passed where a signing key is expected.             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw Layout
//!
//! A private key can be set from 64 bytes laid out as `public ‖ private`, or
//! rebuilt from the 32 private bytes alone. Both paths derive the same
//! public key, so the resulting values compare equal.
//!
//! ## Empty State
//!
//! A key that was never set, or that has been [wiped](PrivateKey::wipe),
//! holds no key material. Empty keys compare unequal to every non-empty key
//! and every operation that needs key material returns `Error::EmptyKey`.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::random::random_array;
use crate::crypto::KEY_LEN;
use crate::encoding::{base64_decode, hex_decode};
use crate::error::{Error, Result};

mod sealed {
    pub trait Sealed {}
}

/// A curve family keys can belong to
///
/// Sealed; implemented only by [`ExchangeCurve`] and [`SigningCurve`].
pub trait KeyKind:
    sealed::Sealed + Copy + Clone + fmt::Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// Human-readable algorithm name
    const NAME: &'static str;

    /// Algorithm tag used in the line and block key-file formats
    const SSH_KEY_TYPE: &'static str;

    /// Derive the public key for a private key
    fn derive_public(private: &[u8; KEY_LEN]) -> [u8; KEY_LEN];

    /// Draw fresh private key material from the random source
    fn generate_private() -> Result<Zeroizing<[u8; KEY_LEN]>>;
}

/// Marker for X25519 key-exchange keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExchangeCurve;

/// Marker for Ed25519 signing keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SigningCurve;

impl sealed::Sealed for ExchangeCurve {}
impl sealed::Sealed for SigningCurve {}

impl KeyKind for ExchangeCurve {
    const NAME: &'static str = "X25519";
    const SSH_KEY_TYPE: &'static str = "x25519";

    fn derive_public(private: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
        let secret = StaticSecret::from(*private);
        X25519PublicKey::from(&secret).to_bytes()
    }

    fn generate_private() -> Result<Zeroizing<[u8; KEY_LEN]>> {
        let mut scalar = Zeroizing::new(random_array::<KEY_LEN>()?);
        // RFC 7748 clamping
        scalar[0] &= 248;
        scalar[31] &= 127;
        scalar[31] |= 64;
        Ok(scalar)
    }
}

impl KeyKind for SigningCurve {
    const NAME: &'static str = "Ed25519";
    const SSH_KEY_TYPE: &'static str = "ssh-ed25519";

    fn derive_public(private: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
        SigningKey::from_bytes(private).verifying_key().to_bytes()
    }

    fn generate_private() -> Result<Zeroizing<[u8; KEY_LEN]>> {
        Ok(Zeroizing::new(random_array::<KEY_LEN>()?))
    }
}

/// X25519 public key
pub type ExchangePublicKey = PublicKey<ExchangeCurve>;
/// X25519 private key
pub type ExchangePrivateKey = PrivateKey<ExchangeCurve>;
/// Ed25519 public key
pub type SigningPublicKey = PublicKey<SigningCurve>;
/// Ed25519 private key
pub type SigningPrivateKey = PrivateKey<SigningCurve>;

// ============================================================================
// PUBLIC KEY
// ============================================================================

/// A 32-byte public key of curve family `K`
///
/// Public keys carry no secrets and can be freely cloned, compared,
/// serialized (as hex) and logged.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct PublicKey<K: KeyKind> {
    key: Option<[u8; KEY_LEN]>,
    kind: PhantomData<K>,
}

impl<K: KeyKind> PublicKey<K> {
    /// Create an empty key
    pub fn new() -> Self {
        Self {
            key: None,
            kind: PhantomData,
        }
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            key: Some(bytes),
            kind: PhantomData,
        }
    }

    /// Raw key bytes, or `None` if the key is empty
    pub fn as_bytes(&self) -> Option<&[u8; KEY_LEN]> {
        self.key.as_ref()
    }

    /// Raw key bytes, failing with `EmptyKey` if the key is empty
    pub fn to_bytes(&self) -> Result<[u8; KEY_LEN]> {
        self.key.ok_or(Error::EmptyKey)
    }

    /// Whether the key holds key material
    pub fn is_valid(&self) -> bool {
        self.key.is_some()
    }

    /// Replace the key with `data`, which must be exactly 32 bytes
    pub fn set_raw_data(&mut self, data: &[u8]) -> Result<()> {
        self.wipe();
        let bytes: [u8; KEY_LEN] = data.try_into().map_err(|_| Error::InvalidKeyLength {
            expected: KEY_LEN,
            actual: data.len(),
        })?;
        self.key = Some(bytes);
        Ok(())
    }

    /// Set from hex text (permissive: non-hex characters are skipped)
    pub fn set_from_hex_encoded_string(&mut self, text: &str) -> Result<()> {
        let decoded = decode_hex_key(text)?;
        self.set_raw_data(&decoded)
    }

    /// Set from base64 text (characters outside the alphabet are skipped)
    pub fn set_from_base64_encoded_string(&mut self, text: &str) -> Result<()> {
        let decoded = decode_base64_key(text)?;
        self.set_raw_data(&decoded)
    }

    /// Lowercase hex encoding of the key
    pub fn to_hex(&self) -> Result<String> {
        Ok(hex::encode(self.to_bytes()?))
    }

    /// Copy another key into this one
    pub fn copy_from(&mut self, other: &PublicKey<K>) {
        self.key = other.key;
    }

    /// Clear the key, leaving it empty
    pub fn wipe(&mut self) {
        if let Some(key) = self.key.as_mut() {
            key.zeroize();
        }
        self.key = None;
    }
}

impl<K: KeyKind> fmt::Debug for PublicKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "PublicKey<{}>({})", K::NAME, hex::encode(key)),
            None => write!(f, "PublicKey<{}>(empty)", K::NAME),
        }
    }
}

impl<K: KeyKind> From<[u8; KEY_LEN]> for PublicKey<K> {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<K: KeyKind> Serialize for PublicKey<K> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.key {
            Some(key) => serializer.serialize_str(&hex::encode(key)),
            None => Err(serde::ser::Error::custom("cannot serialize an empty key")),
        }
    }
}

impl<'de, K: KeyKind> Deserialize<'de> for PublicKey<K> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let bytes: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid length"))?;
        Ok(Self::from_bytes(bytes))
    }
}

// ============================================================================
// PRIVATE KEY
// ============================================================================

/// A private key of curve family `K`, with its derived public key
///
/// ## Security
///
/// - Private bytes are zeroized on [`wipe`](Self::wipe) and on drop
/// - Equality is constant-time over the private bytes
/// - `Debug` output never includes the private bytes
#[derive(Clone, Default)]
pub struct PrivateKey<K: KeyKind> {
    private: Option<Zeroizing<[u8; KEY_LEN]>>,
    public: [u8; KEY_LEN],
    kind: PhantomData<K>,
}

impl<K: KeyKind> PrivateKey<K> {
    /// Create an empty key
    pub fn new() -> Self {
        Self {
            private: None,
            public: [0u8; KEY_LEN],
            kind: PhantomData,
        }
    }

    /// Generate a new random key
    pub fn generate() -> Result<Self> {
        let private = K::generate_private()?;
        tracing::trace!(algorithm = K::NAME, "Generated private key");
        Ok(Self::from_private_data(&private))
    }

    /// Reconstruct a key from its 32 private bytes, deriving the public key
    pub fn from_private_data(private: &[u8; KEY_LEN]) -> Self {
        let mut key = Self::new();
        key.rebuild_from_private_data(private);
        key
    }

    /// Replace this key with one rebuilt from 32 private bytes
    ///
    /// The result equals a key set from the 64-byte `public ‖ private` form
    /// with the same private bytes.
    pub fn rebuild_from_private_data(&mut self, private: &[u8; KEY_LEN]) {
        self.wipe();
        self.public = K::derive_public(private);
        self.private = Some(Zeroizing::new(*private));
    }

    /// Set from raw bytes
    ///
    /// Accepts either 64 bytes (`public ‖ private`) or the 32 private bytes
    /// alone. In the 64-byte form the public half must match the key derived
    /// from the private half.
    pub fn set_raw_data(&mut self, data: &[u8]) -> Result<()> {
        self.wipe();
        match data.len() {
            KEY_LEN => {
                let private: &[u8; KEY_LEN] = data.try_into().map_err(|_| Error::InvalidKeyLength {
                    expected: KEY_LEN,
                    actual: data.len(),
                })?;
                self.rebuild_from_private_data(private);
                Ok(())
            }
            len if len == 2 * KEY_LEN => {
                let (public, private) = data.split_at(KEY_LEN);
                let private: &[u8; KEY_LEN] = private.try_into().map_err(|_| Error::InvalidKeyLength {
                    expected: 2 * KEY_LEN,
                    actual: len,
                })?;
                let derived = K::derive_public(private);
                if !bool::from(derived[..].ct_eq(public)) {
                    tracing::debug!(algorithm = K::NAME, "Public half does not match private key");
                    return Err(Error::InvalidKeyFormat(
                        "public key does not match private key".into(),
                    ));
                }
                self.rebuild_from_private_data(private);
                Ok(())
            }
            len => Err(Error::InvalidKeyLength {
                expected: 2 * KEY_LEN,
                actual: len,
            }),
        }
    }

    /// Set from hex text of the 32- or 64-byte raw form
    pub fn set_from_hex_encoded_string(&mut self, text: &str) -> Result<()> {
        let decoded = decode_hex_key(text)?;
        self.set_raw_data(&decoded)
    }

    /// Set from base64 text of the 32- or 64-byte raw form
    pub fn set_from_base64_encoded_string(&mut self, text: &str) -> Result<()> {
        let decoded = decode_base64_key(text)?;
        self.set_raw_data(&decoded)
    }

    /// The 64-byte `public ‖ private` raw form
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn raw_data(&self) -> Result<Zeroizing<[u8; 2 * KEY_LEN]>> {
        let private = self.private_bytes()?;
        let mut raw = Zeroizing::new([0u8; 2 * KEY_LEN]);
        raw[..KEY_LEN].copy_from_slice(&self.public);
        raw[KEY_LEN..].copy_from_slice(private);
        Ok(raw)
    }

    /// The 32 private bytes
    pub fn private_data(&self) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        Ok(Zeroizing::new(*self.private_bytes()?))
    }

    pub(crate) fn private_bytes(&self) -> Result<&[u8; KEY_LEN]> {
        self.private.as_deref().ok_or(Error::EmptyKey)
    }

    pub(crate) fn public_bytes(&self) -> Result<&[u8; KEY_LEN]> {
        match self.private {
            Some(_) => Ok(&self.public),
            None => Err(Error::EmptyKey),
        }
    }

    /// Extract the matching public key
    pub fn public_key(&self) -> Result<PublicKey<K>> {
        Ok(PublicKey::from_bytes(*self.public_bytes()?))
    }

    /// Whether `public` is the public half of this key
    ///
    /// Always `false` if either key is empty.
    pub fn matches_public_key(&self, public: &PublicKey<K>) -> bool {
        match (self.public_bytes(), public.as_bytes()) {
            (Ok(ours), Some(theirs)) => ours[..].ct_eq(&theirs[..]).into(),
            _ => false,
        }
    }

    /// Whether the key holds key material
    pub fn is_valid(&self) -> bool {
        self.private.is_some()
    }

    /// Copy another key into this one
    pub fn copy_from(&mut self, other: &PrivateKey<K>) {
        self.wipe();
        self.private = other.private.clone();
        self.public = other.public;
    }

    /// Zero all key material, leaving the key empty
    pub fn wipe(&mut self) {
        // Dropping the Zeroizing wrapper clears the private bytes
        self.private = None;
        self.public.zeroize();
    }
}

impl<K: KeyKind> PartialEq for PrivateKey<K> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.private, &other.private) {
            (Some(a), Some(b)) => {
                let private_eq = a[..].ct_eq(&b[..]);
                let public_eq = self.public[..].ct_eq(&other.public[..]);
                (private_eq & public_eq).into()
            }
            (None, None) => true,
            _ => false,
        }
    }
}

impl<K: KeyKind> Eq for PrivateKey<K> {}

impl<K: KeyKind> fmt::Debug for PrivateKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.private {
            Some(_) => write!(
                f,
                "PrivateKey<{}>(public: {}, private: <redacted>)",
                K::NAME,
                hex::encode(self.public)
            ),
            None => write!(f, "PrivateKey<{}>(empty)", K::NAME),
        }
    }
}

// ============================================================================
// TEXT HELPERS
// ============================================================================

/// Largest raw key form accepted from text (64-byte private layout)
const MAX_RAW_KEY_LEN: usize = 2 * KEY_LEN;

fn decode_hex_key(text: &str) -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(vec![0u8; MAX_RAW_KEY_LEN]);
    let n = hex_decode(text, &mut buf[..]).map_err(|_| {
        Error::InvalidKeyFormat("hex key text longer than any key".into())
    })?;
    buf.truncate(n);
    Ok(buf)
}

fn decode_base64_key(text: &str) -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(vec![0u8; MAX_RAW_KEY_LEN]);
    let n = base64_decode(text, &mut buf[..], true).map_err(|_| {
        Error::InvalidKeyFormat("base64 key text longer than any key".into())
    })?;
    buf.truncate(n);
    Ok(buf)
}

// ============================================================================
// TESTS
// ============================================================================
