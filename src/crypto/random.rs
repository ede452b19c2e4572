//! # Random Source
//!
//! All randomness in the crate comes from the operating system CSPRNG via
//! [`rand::rngs::OsRng`]. `OsRng` holds no state of its own, so it can be
//! used from any number of threads without locking.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::Result;

/// Fill `buf` with cryptographically secure random bytes
///
/// Used for symmetric keys, IVs and private key scalars.
///
/// ## Errors
///
/// `RngFailed` if the operating system random source is unavailable.
pub fn generate_random_block(buf: &mut [u8]) -> Result<()> {
    OsRng.try_fill_bytes(buf)?;
    Ok(())
}

/// Generate a random fixed-size array
pub fn random_array<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    generate_random_block(&mut bytes)?;
    Ok(bytes)
}

// ============================================================================
// TESTS
// ============================================================================
