//! # Hex Rendering Helpers
//!
//! Lowercase hex encoding and decoding for digests and salts crossing the
//! wire boundary. Binary values live as fixed byte arrays inside the
//! protocol and only become hex at serialization time.

use thiserror::Error;

/// Errors produced while parsing hex input.
#[derive(Error, Debug)]
pub enum HexError {
    /// Input length is odd or does not match the expected byte count.
    #[error("hex string has invalid length {0}")]
    InvalidLength(usize),

    /// Input contains a non-hex character.
    #[error("invalid hex character {ch:?} at position {position}")]
    InvalidChar {
        /// The offending character.
        ch: char,
        /// Byte offset of the offending character.
        position: usize,
    },
}

/// Render bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a hex string (upper or lower case) into bytes.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, HexError> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(HexError::InvalidLength(hex.len()));
    }
    let mut out = Vec::with_capacity(hex.len() / 2);
    let chars: Vec<char> = hex.chars().collect();
    for (i, pair) in chars.chunks(2).enumerate() {
        let hi = hex_val(pair[0], i * 2)?;
        let lo = hex_val(pair[1], i * 2 + 1)?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

/// Parse a hex string into a fixed-size array.
pub fn from_hex_array<const N: usize>(hex: &str) -> Result<[u8; N], HexError> {
    let bytes = from_hex(hex)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| HexError::InvalidLength(len * 2))
}

fn hex_val(c: char, position: usize) -> Result<u8, HexError> {
    c.to_digit(16)
        .map(|v| v as u8)
        .ok_or(HexError::InvalidChar { ch: c, position })
}
