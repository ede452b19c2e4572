//! Hex encoding and the permissive hex decoder.

use crate::error::{Error, Result};

/// Buffer size `hex_encode` needs for `len` input bytes (NUL included)
pub fn hex_encode_max_output(len: usize) -> usize {
    len * 2 + 1
}

/// Upper bound on bytes `hex_decode` can produce from `text_len` characters
pub fn hex_decode_max_output(text_len: usize) -> usize {
    text_len / 2
}

/// Encode bytes as a lowercase, NUL-terminated hex string
///
/// ## Returns
///
/// Number of characters written, not counting the terminating NUL.
///
/// ## Errors
///
/// `BufferTooSmall` if `out` cannot hold `2 * data.len() + 1` bytes. Nothing
/// is written in that case.
pub fn hex_encode(data: &[u8], out: &mut [u8]) -> Result<usize> {
    let needed = hex_encode_max_output(data.len());
    if out.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let chars = data.len() * 2;
    hex::encode_to_slice(data, &mut out[..chars]).map_err(|_| Error::BufferTooSmall {
        needed,
        available: out.len(),
    })?;
    out[chars] = 0;

    Ok(chars)
}

/// Decode hex text, skipping every character that is not a hex digit
///
/// The remaining digits are paired strictly left to right and an unpaired
/// final digit is dropped. There is no `0x` prefix detection:
///
/// ```text
/// "x,F\nF1\t ,2\t~E "  →  F F 1 2 E      →  FF 12
/// "0xFF 0x12 0xE"      →  0 F F 0 1 2 0 E →  0F F0 12 0E
/// ```
///
/// ## Errors
///
/// `DecodeTruncated` if `out` fills up before the input is exhausted. The
/// bytes decoded so far stay in `out`.
pub fn hex_decode(text: impl AsRef<[u8]>, out: &mut [u8]) -> Result<usize> {
    let mut written = 0;
    let mut high: Option<u8> = None;

    for &c in text.as_ref() {
        let Some(nibble) = hex_nibble(c) else {
            continue;
        };

        match high.take() {
            None => high = Some(nibble),
            Some(h) => {
                if written == out.len() {
                    return Err(Error::DecodeTruncated { decoded: written });
                }
                out[written] = (h << 4) | nibble;
                written += 1;
            }
        }
    }

    Ok(written)
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
