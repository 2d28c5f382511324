//! Field types of the protocol profile.
//!
//! Every field of a message carries one of a closed set of types. A type
//! fixes the base-type tag announced in definition records, the encoded
//! width, the sentinel pattern marking an absent value, and the transform
//! between application values and raw integers (timestamps are rebased to
//! the protocol epoch, angles become semicircles, lengths are scaled).

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use thiserror::Error;

use super::codec::{self, UnsupportedWidth};

/// Seconds from the Unix epoch to the protocol epoch (1989-12-31T00:00:00Z).
pub const EPOCH_OFFSET: u64 = 631_065_600;

/// Semicircles per degree of arc.
pub const SEMICIRCLES_PER_DEGREE: f64 = (1u64 << 31) as f64 / 180.0;

/// A value supplied for a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An unsigned integer.
    Uint(u64),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Text, for string fields and symbolic lookups.
    Text(String),
}

impl Value {
    pub(crate) fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Uint(v) => Some(*v as i128),
            Self::Int(v) => Some(*v as i128),
            _ => None,
        }
    }

    pub(crate) fn as_float(&self) -> Option<f64> {
        match self {
            Self::Uint(v) => Some(*v as f64),
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub(crate) fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Uint(_) => "an unsigned integer",
            Self::Int(_) => "a signed integer",
            Self::Float(_) => "a floating-point number",
            Self::Text(_) => "text",
        }
    }
}

macro_rules! value_from {
    ($variant:ident, $($t:ty),+) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Self::$variant(value.into())
            }
        })+
    };
}

value_from!(Uint, u8, u16, u32, u64);
value_from!(Int, i8, i16, i32, i64);
value_from!(Float, f32, f64);
value_from!(Text, &str, String);

/// An error applying a field type's value transform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// The supplied value cannot be interpreted by this type.
    #[error("Expected {expected}, got {found}.")]
    Mismatched {
        expected: &'static str,
        found: &'static str,
    },
}

/// A field type: a base-type tag, a byte width, a sentinel, and a value
/// transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// `enum`, an unsigned byte, usually filled through a symbolic table.
    Enum,
    Sint8,
    Uint8,
    Sint16,
    Uint16,
    Sint32,
    Uint32,
    Sint64,
    Uint64,
    /// `uint8z`, an unsigned byte whose sentinel is zero.
    Uint8z,
    Uint16z,
    Uint32z,
    Uint64z,
    /// Null-terminated text in a fixed number of bytes.
    String(u8),
    /// Seconds since the protocol epoch, stored as `uint32`.
    Timestamp,
    /// An angle in degrees, stored as `sint32` semicircles.
    Semicircles,
    /// A length in meters, stored as `uint32` centimeters.
    Centimeters,
    /// An elevation in meters, offset by 500 and stored as `uint16`.
    Altitude,
    /// An elevation in meters, offset by 500 and stored as `uint32`.
    Altitude32,
    /// A span in seconds, stored as `uint32` milliseconds.
    Duration,
}

impl FieldType {
    /// The base-type tag announced in definition records.
    pub fn base_type(&self) -> u8 {
        match self {
            Self::Enum => 0x00,
            Self::Sint8 => 0x01,
            Self::Uint8 => 0x02,
            Self::String(_) => 0x07,
            Self::Uint8z => 0x0A,
            Self::Sint16 => 0x83,
            Self::Uint16 | Self::Altitude => 0x84,
            Self::Sint32 | Self::Semicircles => 0x85,
            Self::Uint32 | Self::Timestamp | Self::Centimeters | Self::Altitude32 | Self::Duration => 0x86,
            Self::Uint16z => 0x8B,
            Self::Uint32z => 0x8C,
            Self::Sint64 => 0x8E,
            Self::Uint64 => 0x8F,
            Self::Uint64z => 0x90,
        }
    }

    /// The encoded width, in bytes.
    pub const fn byte_count(&self) -> u8 {
        match self {
            Self::Enum | Self::Sint8 | Self::Uint8 | Self::Uint8z => 1,
            Self::Sint16 | Self::Uint16 | Self::Uint16z | Self::Altitude => 2,
            Self::Sint32 | Self::Uint32 | Self::Uint32z => 4,
            Self::Timestamp | Self::Semicircles | Self::Centimeters | Self::Altitude32 | Self::Duration => 4,
            Self::Sint64 | Self::Uint64 | Self::Uint64z => 8,
            Self::String(n) => *n,
        }
    }

    /// The sentinel bytes written for an absent value.
    pub fn default_bytes(&self) -> Vec<u8> {
        match self {
            Self::String(n) => vec![0x00; *n as usize],
            _ => codec::encode_integer(self.sentinel(), self.byte_count() as usize, true),
        }
    }

    /// Encode a value into this type's raw bytes, big-endian.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, ValueError> {
        let byte_count = self.byte_count() as usize;

        let raw: i128 = match self {
            Self::String(_) => {
                let text = value.as_text().ok_or(self.mismatch(value))?;
                return Ok(codec::encode_fixed_text(text, byte_count));
            }
            Self::Timestamp => value.as_integer().ok_or(self.mismatch(value))? - EPOCH_OFFSET as i128,
            Self::Semicircles => {
                (value.as_float().ok_or(self.mismatch(value))? * SEMICIRCLES_PER_DEGREE) as i128
            }
            Self::Centimeters => (value.as_float().ok_or(self.mismatch(value))? * 100.0) as i128,
            Self::Altitude | Self::Altitude32 => {
                (value.as_float().ok_or(self.mismatch(value))? + 500.0) as i128
            }
            Self::Duration => (value.as_float().ok_or(self.mismatch(value))? * 1000.0) as i128,
            _ => value.as_integer().ok_or(self.mismatch(value))?,
        };

        Ok(codec::encode_integer(raw, byte_count, true))
    }

    /// Decode this type's raw bytes into a value, or `None` for a field
    /// holding its sentinel.
    pub fn decode(&self, r: &[u8]) -> Result<Option<Value>, UnsupportedWidth> {
        if let Self::String(_) = self {
            return Ok(Some(Value::Text(codec::decode_text(r))));
        }

        let raw = codec::decode_integer(r, !self.signed(), true)?;
        if raw == self.sentinel() {
            return Ok(None);
        }

        Ok(Some(match self {
            Self::Timestamp => Value::Uint((raw + EPOCH_OFFSET as i128) as u64),
            Self::Semicircles => {
                let mut degrees = raw as f64 / SEMICIRCLES_PER_DEGREE;
                if degrees > 180.0 {
                    degrees -= 360.0;
                }
                if degrees < -180.0 {
                    degrees += 360.0;
                }
                Value::Float(degrees)
            }
            Self::Centimeters => Value::Float(raw as f64 / 100.0),
            Self::Altitude | Self::Altitude32 => Value::Int(raw as i64 - 500),
            Self::Duration => Value::Float(raw as f64 / 1000.0),
            _ if self.signed() => Value::Int(raw as i64),
            _ => Value::Uint(raw as u64),
        }))
    }

    fn signed(&self) -> bool {
        matches!(
            self,
            Self::Sint8 | Self::Sint16 | Self::Sint32 | Self::Sint64 | Self::Semicircles
        )
    }

    /// The raw sentinel for integer-backed kinds: zero for z-variants, the
    /// maximum representable value otherwise.
    fn sentinel(&self) -> i128 {
        if matches!(self, Self::Uint8z | Self::Uint16z | Self::Uint32z | Self::Uint64z) {
            return 0;
        }

        let bits = 8 * self.byte_count() as u32 - self.signed() as u32;
        (1 << bits) - 1
    }

    fn mismatch(&self, value: &Value) -> ValueError {
        let expected = match self {
            Self::String(_) => "text",
            Self::Timestamp => "an integer timestamp",
            Self::Semicircles | Self::Centimeters | Self::Altitude | Self::Altitude32 | Self::Duration => {
                "a number"
            }
            _ => "an integer",
        };

        ValueError::Mismatched {
            expected,
            found: value.description(),
        }
    }
}
