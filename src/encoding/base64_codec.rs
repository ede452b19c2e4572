//! Base64 encoding (standard alphabet, `=` padding) and the legacy decoder.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{Error, Result};

/// Line break inserted by default every [`LINE_LENGTH`] output characters
pub const DEFAULT_LINE_BREAK: &str = "\n";

/// Encoded characters per line when line breaks are enabled
const LINE_LENGTH: usize = 76;

/// Input bytes that encode to exactly one full line
const BYTES_PER_LINE: usize = LINE_LENGTH / 4 * 3;

/// Marks the top of a completed 24-bit group in the decode accumulator
const GROUP_SENTINEL: u32 = 1 << 24;

/// Buffer size `base64_encode` needs for `len` input bytes (NUL included)
pub fn base64_encode_max_output(len: usize, line_break: Option<&str>) -> usize {
    let chars = len.div_ceil(3) * 4;
    let breaks = match line_break {
        Some(lb) => chars.div_ceil(LINE_LENGTH) * lb.len(),
        None => 0,
    };
    chars + breaks + 1
}

/// Upper bound on bytes `base64_decode` can produce from `text_len` characters
pub fn base64_decode_max_output(text_len: usize) -> usize {
    text_len / 4 * 3 + 2
}

/// Encode bytes as NUL-terminated base64
///
/// With `line_break` set, the break string is appended after every 76
/// encoded characters and after the final partial line.
///
/// ## Returns
///
/// Number of characters written, not counting the terminating NUL. Empty
/// input writes only the NUL and returns 0.
///
/// ## Errors
///
/// `BufferTooSmall` if `out` is shorter than
/// [`base64_encode_max_output`]. Nothing is written in that case.
pub fn base64_encode(data: &[u8], out: &mut [u8], line_break: Option<&str>) -> Result<usize> {
    let needed = base64_encode_max_output(data.len(), line_break);
    if out.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let mut pos = 0;
    for line in data.chunks(BYTES_PER_LINE) {
        pos += STANDARD
            .encode_slice(line, &mut out[pos..])
            .map_err(|_| Error::BufferTooSmall {
                needed,
                available: out.len(),
            })?;

        if let Some(lb) = line_break {
            out[pos..pos + lb.len()].copy_from_slice(lb.as_bytes());
            pos += lb.len();
        }
    }
    out[pos] = 0;

    Ok(pos)
}

/// Encode bytes as a base64 `String` without line breaks
pub fn base64_encode_to_string(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode base64 text into `out`
///
/// ## Parameters
///
/// - `text`: Base64 text; decoding ends at the first `=`
/// - `out`: Destination buffer
/// - `ignore_invalid`: Skip characters outside the alphabet instead of failing
///
/// ## Partial Results
///
/// Decoding is streaming: every completed group of four characters is
/// written before the next character is examined. When decoding fails the
/// bytes already written are valid and their count is carried by the error:
///
/// ```text
/// "AAAA!@#..." (ignore_invalid = false)
///   AAAA → 00 00 00 written
///   '!'  → Err(InvalidEncoding { decoded: 3 })
/// ```
///
/// Empty input returns `Ok(0)` without touching `out`.
pub fn base64_decode(text: impl AsRef<[u8]>, out: &mut [u8], ignore_invalid: bool) -> Result<usize> {
    let mut written = 0;
    // Bits accumulate below a leading 1 so the number of buffered sextets
    // can be recovered from the position of that sentinel.
    let mut group: u32 = 1;

    for &c in text.as_ref() {
        if c == b'=' {
            break;
        }

        let Some(sextet) = decode_char(c) else {
            if ignore_invalid {
                continue;
            }
            tracing::trace!(decoded = written, "base64 decode hit invalid character");
            return Err(Error::InvalidEncoding {
                encoding: "base64",
                decoded: written,
            });
        };

        group = (group << 6) | u32::from(sextet);
        if group & GROUP_SENTINEL != 0 {
            if out.len() - written < 3 {
                // Flushed byte-by-byte below so as much as fits is kept
                break;
            }
            out[written] = (group >> 16) as u8;
            out[written + 1] = (group >> 8) as u8;
            out[written + 2] = group as u8;
            written += 3;
            group = 1;
        }
    }

    // Flush a trailing partial group: 2, 3 or 4 sextets give 1, 2 or 3 bytes
    if group >= 1 << 6 {
        let mut remaining = 3;
        while group < GROUP_SENTINEL {
            remaining -= 1;
            group <<= 6;
        }

        while remaining > 0 {
            if written == out.len() {
                return Err(Error::DecodeTruncated { decoded: written });
            }
            out[written] = (group >> 16) as u8;
            written += 1;
            group <<= 8;
            remaining -= 1;
        }
    }

    Ok(written)
}

fn decode_char(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 13] = [
        0x14, 0xfe, 0x26, 0x19, 0x54, 0x78, 0x00, 0x35, 0x19, 0xa9, 0x54, 0x4e, 0x99,
    ];

    #[test]
    fn test_base64_round_trip() {
        let mut encoded = [0u8; 64];
        let chars = base64_encode(&SAMPLE, &mut encoded, Some(DEFAULT_LINE_BREAK)).unwrap();
        assert_eq!(&encoded[..chars], b"FP4mGVR4ADUZqVROmQ==\n");
        assert_eq!(encoded[chars], 0);

        let mut decoded = [0u8; 32];
        let n = base64_decode(&encoded[..chars], &mut decoded, true).unwrap();
        assert_eq!(&decoded[..n], &SAMPLE);
    }

    #[test]
    fn test_base64_matches_standard_engine() {
        let data: Vec<u8> = (0u8..=200).collect();
        let mut encoded = vec![0u8; base64_encode_max_output(data.len(), None)];
        let chars = base64_encode(&data, &mut encoded, None).unwrap();
        assert_eq!(&encoded[..chars], STANDARD.encode(&data).as_bytes());
    }

    #[test]
    fn test_base64_line_breaks() {
        let data = [0x5Au8; 100];
        let mut encoded = vec![0u8; base64_encode_max_output(data.len(), Some("\r\n"))];
        let chars = base64_encode(&data, &mut encoded, Some("\r\n")).unwrap();
        let text = std::str::from_utf8(&encoded[..chars]).unwrap();

        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 76);
        assert_eq!(lines[1].len(), 60);
        assert!(lines[2].is_empty());
        assert_eq!(chars + 1, encoded.len());
    }

    #[test]
    fn test_base64_encode_empty() {
        let mut buf = [1u8; 4];
        let chars = base64_encode(&[], &mut buf, None).unwrap();
        assert_eq!(chars, 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn test_base64_encode_buffer_too_small() {
        let mut buf = [1u8; 8];
        let err = base64_encode(&SAMPLE, &mut buf, None).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { needed: 21, .. }));
        assert_eq!(buf, [1u8; 8]);
    }

    #[test]
    fn test_base64_decode_empty_leaves_buffer_untouched() {
        let mut buf = [1u8; 4];
        assert_eq!(base64_decode(b"", &mut buf, true).unwrap(), 0);
        assert_eq!(buf[0], 1);

        assert_eq!(base64_decode("", &mut buf, true).unwrap(), 0);
        assert_eq!(buf[0], 1);
    }

    #[test]
    fn test_base64_decode_error_keeps_prefix() {
        let mut buf = [1u8; 4];
        let err = base64_decode("AAAA!@#$%^&*()_+|<>?:;'[]{}\\/,.", &mut buf, false).unwrap_err();

        assert_eq!(err.decoded_len(), Some(3));
        assert_eq!(buf, [0, 0, 0, 1]);
    }

    #[test]
    fn test_base64_decode_ignores_invalid() {
        let mut buf = [0u8; 16];
        let n = base64_decode("FP4m\nGVR4 ADUZ\tqVROmQ==", &mut buf, true).unwrap();
        assert_eq!(&buf[..n], &SAMPLE);
    }

    #[test]
    fn test_base64_decode_strict_rejects_whitespace() {
        let mut buf = [0u8; 16];
        let err = base64_decode("FP4m\nGVR4", &mut buf, false).unwrap_err();
        assert_eq!(err.decoded_len(), Some(3));
    }

    #[test]
    fn test_base64_decode_truncated() {
        let mut buf = [9u8; 5];
        let err = base64_decode("FP4mGVR4ADUZ", &mut buf, true).unwrap_err();
        assert_eq!(err, Error::DecodeTruncated { decoded: 5 });
        assert_eq!(&buf, &SAMPLE[..5]);
    }

    #[test]
    fn test_base64_decode_unpadded_tail() {
        let mut buf = [0u8; 8];
        assert_eq!(base64_decode("QQ", &mut buf, false).unwrap(), 1);
        assert_eq!(buf[0], b'A');
        assert_eq!(base64_decode("QUI", &mut buf, false).unwrap(), 2);
        assert_eq!(&buf[..2], b"AB");
    }
}
