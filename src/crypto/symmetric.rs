//! # Symmetric Encryption Module
//!
//! AES-256 encryption with a caller-supplied IV, in two flavours:
//!
//! - **Padded block encryption** (AES-256-CBC, PKCS#7). Output is the input
//!   rounded up to the next whole block; there is always at least one byte
//!   of padding.
//! - **Authenticated encryption** (AES-256-GCM). Output is the input plus a
//!   16-byte authentication tag.
//!
//! ## IV Handling
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         IV IS OUT OF BAND                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   plaintext ──┐                                                        │
//! │   key ────────┼──► encrypt ──► ciphertext (no IV inside)               │
//! │   iv ─────────┘                                                        │
//! │                                                                         │
//! │   The caller stores/transmits the IV next to the ciphertext.           │
//! │   Decrypt needs exactly the same (key, iv) pair.                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## In-Place Operation
//!
//! Rust does not allow a shared source slice and a mutable destination
//! slice to alias, so every operation also has an `_in_place` form working on
//! a single `&mut [u8]`. Both forms produce byte-identical output.
//!
//! ## Sizes
//!
//! | Constant | Value |
//! |----------|-------|
//! | Key | 32 bytes (AES-256) |
//! | CBC IV | 16 bytes (one block) |
//! | GCM IV | 12 bytes |
//! | GCM tag | 16 bytes |
//!
//! Any other key or IV length is a contract violation and is rejected with
//! `InvalidKeyLength` / `InvalidIvLength`.

use aes::Aes256;
use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Nonce as AesNonce, Tag,
};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::{AUTH_IV_LEN, AUTH_TAG_LEN, SYMMETRIC_BLOCK_SIZE, SYMMETRIC_KEY_LEN};
use crate::error::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Ciphertext length for `plaintext_len` bytes under PKCS#7 padding
pub fn padded_len(plaintext_len: usize) -> usize {
    (plaintext_len / SYMMETRIC_BLOCK_SIZE + 1) * SYMMETRIC_BLOCK_SIZE
}

fn check_key(key: &[u8]) -> Result<()> {
    if key.len() != SYMMETRIC_KEY_LEN {
        return Err(Error::InvalidKeyLength {
            expected: SYMMETRIC_KEY_LEN,
            actual: key.len(),
        });
    }
    Ok(())
}

fn check_iv(iv: &[u8], expected: usize) -> Result<()> {
    if iv.len() != expected {
        return Err(Error::InvalidIvLength {
            expected,
            actual: iv.len(),
        });
    }
    Ok(())
}

fn check_capacity(needed: usize, available: usize) -> Result<()> {
    if available < needed {
        return Err(Error::BufferTooSmall { needed, available });
    }
    Ok(())
}

fn cbc_encryptor(key: &[u8], iv: &[u8]) -> Result<Aes256CbcEnc> {
    check_key(key)?;
    check_iv(iv, SYMMETRIC_BLOCK_SIZE)?;
    Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))
}

fn cbc_decryptor(key: &[u8], iv: &[u8]) -> Result<Aes256CbcDec> {
    check_key(key)?;
    check_iv(iv, SYMMETRIC_BLOCK_SIZE)?;
    Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| Error::DecryptionFailed(format!("Invalid key: {}", e)))
}

fn check_ciphertext_len(len: usize) -> Result<()> {
    if len == 0 || len % SYMMETRIC_BLOCK_SIZE != 0 {
        return Err(Error::DecryptionFailed(format!(
            "Ciphertext length {} is not a whole number of blocks",
            len
        )));
    }
    Ok(())
}

// ============================================================================
// PADDED BLOCK ENCRYPTION (AES-256-CBC)
// ============================================================================

/// Encrypt `plaintext` into `out` with AES-256-CBC and PKCS#7 padding
///
/// ## Parameters
///
/// - `key`: 32-byte key
/// - `iv`: 16-byte IV (not written to the output)
/// - `plaintext`: Data to encrypt
/// - `out`: Destination, at least [`padded_len`]`(plaintext.len())` bytes
///
/// ## Returns
///
/// Ciphertext length (a multiple of 16, always greater than the input length)
pub fn symmetric_encrypt_with_iv(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    out: &mut [u8],
) -> Result<usize> {
    let encryptor = cbc_encryptor(key, iv)?;
    check_capacity(padded_len(plaintext.len()), out.len())?;

    let ciphertext = encryptor
        .encrypt_padded_b2b_mut::<Pkcs7>(plaintext, out)
        .map_err(|_| Error::EncryptionFailed("Padding failed".into()))?;

    Ok(ciphertext.len())
}

/// Encrypt the first `plaintext_len` bytes of `buf` in place
///
/// `buf` must have room for the padded result. Produces exactly the bytes
/// [`symmetric_encrypt_with_iv`] would.
pub fn symmetric_encrypt_in_place(
    key: &[u8],
    iv: &[u8],
    buf: &mut [u8],
    plaintext_len: usize,
) -> Result<usize> {
    let encryptor = cbc_encryptor(key, iv)?;
    check_capacity(padded_len(plaintext_len), buf.len())?;

    let ciphertext = encryptor
        .encrypt_padded_mut::<Pkcs7>(buf, plaintext_len)
        .map_err(|_| Error::EncryptionFailed("Padding failed".into()))?;

    Ok(ciphertext.len())
}

/// Decrypt AES-256-CBC `ciphertext` into `out` and strip the padding
///
/// ## Returns
///
/// Plaintext length, exactly the length originally encrypted.
///
/// ## Errors
///
/// - `DecryptionFailed` for a ciphertext that is not whole blocks or whose
///   padding is invalid (usually a wrong key or IV)
/// - `BufferTooSmall` if the plaintext does not fit in `out`
///
/// When `out` is shorter than the ciphertext the data is staged in a
/// zeroized scratch buffer, so `out` only needs to fit the plaintext.
pub fn symmetric_decrypt_with_iv(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    out: &mut [u8],
) -> Result<usize> {
    let decryptor = cbc_decryptor(key, iv)?;
    check_ciphertext_len(ciphertext.len())?;

    if out.len() >= ciphertext.len() {
        let plaintext = decryptor
            .decrypt_padded_b2b_mut::<Pkcs7>(ciphertext, out)
            .map_err(|_| {
                tracing::debug!(len = ciphertext.len(), "CBC padding check failed");
                Error::DecryptionFailed("Invalid padding".into())
            })?;
        return Ok(plaintext.len());
    }

    let mut staging = Zeroizing::new(ciphertext.to_vec());
    let plaintext = decryptor
        .decrypt_padded_mut::<Pkcs7>(&mut staging)
        .map_err(|_| {
            tracing::debug!(len = ciphertext.len(), "CBC padding check failed");
            Error::DecryptionFailed("Invalid padding".into())
        })?;

    check_capacity(plaintext.len(), out.len())?;
    out[..plaintext.len()].copy_from_slice(plaintext);
    Ok(plaintext.len())
}

/// Decrypt `buf` (the whole slice is ciphertext) in place
///
/// The plaintext ends up at the start of `buf`; the returned length says
/// how much of it is valid.
pub fn symmetric_decrypt_in_place(key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<usize> {
    let decryptor = cbc_decryptor(key, iv)?;
    check_ciphertext_len(buf.len())?;

    let plaintext = decryptor.decrypt_padded_mut::<Pkcs7>(buf).map_err(|_| {
        tracing::debug!("CBC padding check failed");
        Error::DecryptionFailed("Invalid padding".into())
    })?;

    Ok(plaintext.len())
}

// ============================================================================
// AUTHENTICATED ENCRYPTION (AES-256-GCM)
// ============================================================================

fn gcm_cipher(key: &[u8], iv: &[u8]) -> Result<Aes256Gcm> {
    check_key(key)?;
    check_iv(iv, AUTH_IV_LEN)?;
    Aes256Gcm::new_from_slice(key).map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))
}

/// Encrypt and authenticate `plaintext` with AES-256-GCM
///
/// ## Parameters
///
/// - `key`: 32-byte key
/// - `iv`: 12-byte IV. **Never reuse an IV with the same key.**
/// - `plaintext`: Data to encrypt
/// - `aad`: Additional authenticated data (authenticated, not encrypted)
/// - `out`: Destination, at least `plaintext.len() + 16` bytes
///
/// ## Returns
///
/// Output length: ciphertext followed by the 16-byte tag
pub fn symmetric_auth_encrypt_with_iv(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
    out: &mut [u8],
) -> Result<usize> {
    check_key(key)?;
    check_iv(iv, AUTH_IV_LEN)?;
    check_capacity(plaintext.len() + AUTH_TAG_LEN, out.len())?;
    out[..plaintext.len()].copy_from_slice(plaintext);
    symmetric_auth_encrypt_in_place(key, iv, out, plaintext.len(), aad)
}

/// Encrypt and authenticate the first `plaintext_len` bytes of `buf` in place
///
/// The tag is written directly after the ciphertext.
pub fn symmetric_auth_encrypt_in_place(
    key: &[u8],
    iv: &[u8],
    buf: &mut [u8],
    plaintext_len: usize,
    aad: &[u8],
) -> Result<usize> {
    let cipher = gcm_cipher(key, iv)?;
    check_capacity(plaintext_len + AUTH_TAG_LEN, buf.len())?;

    let tag = cipher
        .encrypt_in_place_detached(AesNonce::from_slice(iv), aad, &mut buf[..plaintext_len])
        .map_err(|e| Error::EncryptionFailed(format!("Encryption failed: {}", e)))?;
    buf[plaintext_len..plaintext_len + AUTH_TAG_LEN].copy_from_slice(&tag);

    Ok(plaintext_len + AUTH_TAG_LEN)
}

/// Verify and decrypt AES-256-GCM output (ciphertext followed by tag)
///
/// ## Errors
///
/// Returns `DecryptionFailed` if:
/// - The ciphertext or tag was tampered with
/// - The AAD doesn't match
/// - The key or IV is wrong
///
/// Nothing is written to `out` unless authentication succeeds.
pub fn symmetric_auth_decrypt_with_iv(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    out: &mut [u8],
) -> Result<usize> {
    let cipher = gcm_cipher(key, iv)?;
    let body_len = auth_body_len(ciphertext.len())?;
    check_capacity(body_len, out.len())?;

    let mut staging = Zeroizing::new(ciphertext[..body_len].to_vec());
    let tag = Tag::from_slice(&ciphertext[body_len..]);
    cipher
        .decrypt_in_place_detached(AesNonce::from_slice(iv), aad, &mut staging, tag)
        .map_err(|_| {
            tracing::debug!(len = ciphertext.len(), "GCM tag mismatch");
            Error::DecryptionFailed("Authentication tag mismatch".into())
        })?;

    out[..body_len].copy_from_slice(&staging);
    Ok(body_len)
}

/// Verify and decrypt `buf` (ciphertext followed by tag) in place
///
/// On success the plaintext occupies the start of `buf`.
pub fn symmetric_auth_decrypt_in_place(
    key: &[u8],
    iv: &[u8],
    buf: &mut [u8],
    aad: &[u8],
) -> Result<usize> {
    let cipher = gcm_cipher(key, iv)?;
    let body_len = auth_body_len(buf.len())?;

    let (body, tag) = buf.split_at_mut(body_len);
    let verified = cipher.decrypt_in_place_detached(
        AesNonce::from_slice(iv),
        aad,
        body,
        Tag::from_slice(tag),
    );
    if verified.is_err() {
        // Never leave unauthenticated plaintext behind
        body.zeroize();
        tracing::debug!(len = body_len, "GCM tag mismatch");
        return Err(Error::DecryptionFailed("Authentication tag mismatch".into()));
    }

    Ok(body_len)
}

fn auth_body_len(len: usize) -> Result<usize> {
    len.checked_sub(AUTH_TAG_LEN)
        .ok_or_else(|| Error::DecryptionFailed("Ciphertext shorter than tag".into()))
}

// ============================================================================
// TESTS
// ============================================================================
