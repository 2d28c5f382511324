//! Conversions between integers, text, and raw bytes.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use thiserror::Error;
use tracing::warn;

/// An error decoding an integer of an unsupported width.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported byte width ({0}).")]
pub struct UnsupportedWidth(pub usize);

/// Encode an integer into a fixed number of bytes.
///
/// Negative values are stored as their two's-complement representation
/// modulo `2^(8 * byte_count)`; a magnitude too large for the width is
/// reported as a warning and wrapped. Values whose natural representation
/// is longer than `byte_count` are truncated from the most-significant end
/// (with a warning); shorter ones are zero-padded. Bytes are produced
/// most-significant first unless `big_endian` is false.
pub fn encode_integer(value: i128, byte_count: usize, big_endian: bool) -> Vec<u8> {
    if byte_count == 0 {
        return Vec::new();
    }

    let bits = 8 * byte_count as u32;

    if value < 0 && bits < 128 && value.unsigned_abs() > 1 << (bits - 1) {
        warn!("integer underflow encoding {value} into {byte_count} bytes");
    }

    // The low `bits` bits of the 128-bit two's complement are exactly the
    // representation modulo `2^bits`.
    let raw = value as u128;
    let bytes = raw.to_be_bytes();

    if value >= 0 {
        let significant = bytes.len() - raw.leading_zeros() as usize / 8;
        if significant.max(1) > byte_count {
            warn!("truncating {value} to fit in {byte_count} bytes");
        }
    }

    let mut r = if byte_count <= bytes.len() {
        bytes[bytes.len() - byte_count..].to_vec()
    } else {
        let fill = if value < 0 { 0xFF } else { 0x00 };
        let mut r = vec![fill; byte_count - bytes.len()];
        r.extend_from_slice(&bytes);
        r
    };

    if !big_endian {
        r.reverse();
    }

    r
}

/// Decode an integer from one, two, four, or eight bytes.
///
/// Any other width is rejected. Signed results are sign-extended from the
/// top bit of the field.
pub fn decode_integer(r: &[u8], unsigned: bool, big_endian: bool) -> Result<i128, UnsupportedWidth> {
    let width = r.len();
    if !matches!(width, 1 | 2 | 4 | 8) {
        return Err(UnsupportedWidth(width));
    }

    let mut raw: u128 = 0;
    if big_endian {
        for b in r {
            raw = raw << 8 | *b as u128;
        }
    } else {
        for b in r.iter().rev() {
            raw = raw << 8 | *b as u128;
        }
    }

    if unsigned {
        return Ok(raw as i128);
    }

    let bits = 8 * width as u32;
    if raw >> (bits - 1) != 0 {
        Ok(raw as i128 - (1 << bits))
    } else {
        Ok(raw as i128)
    }
}

/// Encode text into a fixed number of bytes.
///
/// Takes up to `byte_count - 1` bytes of the string, filling the remainder
/// with zeros; the final byte is always a null terminator.
pub fn encode_fixed_text(text: &str, byte_count: usize) -> Vec<u8> {
    let mut r = vec![0x00; byte_count];
    let take = byte_count.saturating_sub(1);

    for (slot, b) in r.iter_mut().zip(text.bytes().take(take)) {
        *slot = b;
    }

    r
}

/// Decode text from a byte sequence, dropping a single trailing null
/// terminator if present.
pub fn decode_text(r: &[u8]) -> String {
    let r = r.strip_suffix(&[0x00]).unwrap_or(r);
    String::from_utf8_lossy(r).into_owned()
}
