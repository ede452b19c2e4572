//! # Text Encoding Module
//!
//! Hex and base64 codecs that write into caller-owned buffers.
//!
//! ## Buffer Contract
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CALLER-OWNED BUFFERS                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Encoders                                                              │
//! │  ────────                                                               │
//! │  • Capacity is checked before anything is written                      │
//! │  • Output is NUL-terminated; the returned count excludes the NUL       │
//! │  • Too small → Error::BufferTooSmall, buffer untouched                 │
//! │                                                                         │
//! │  Decoders                                                              │
//! │  ────────                                                               │
//! │  • Return the number of bytes written                                  │
//! │  • Hex: every non-hex character is skipped                             │
//! │  • Base64: invalid characters skipped or fatal (caller's choice)       │
//! │  • A failed base64 decode keeps its valid prefix in the buffer and     │
//! │    reports its length through Error::decoded_len()                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The decode rules are deliberately permissive and match long-standing
//! behaviour that existing key files and config blobs depend on. They are
//! covered by tests and must not be "tightened".

mod base64_codec;
mod hex_codec;

pub use base64_codec::{
    base64_decode, base64_decode_max_output, base64_encode, base64_encode_max_output,
    base64_encode_to_string, DEFAULT_LINE_BREAK,
};
pub use hex_codec::{hex_decode, hex_decode_max_output, hex_encode, hex_encode_max_output};
