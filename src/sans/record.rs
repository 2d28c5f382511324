//! Assembling records, document headers, and the check trailer.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::byteorder::big_endian::U16 as U16Be;
use zerocopy::byteorder::little_endian::{U16 as U16Le, U32 as U32Le};
use zerocopy::{Immutable, IntoBytes};

use super::profile;
use super::schema::MessageKind;
use super::types::{Value, ValueError};

/// Protocol version announced in document headers (major 1, minor 0).
pub const PROTOCOL_VERSION: u8 = 0x10;

/// Profile version announced in document headers (major 1, minor 52).
pub const PROFILE_VERSION: u16 = 152;

/// An error assembling a data record.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A required field was not given a value.
    #[error("Missing value for required field '{field}' in {message} message.")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },
    /// A symbolic field was given a name outside its table.
    #[error("Unknown value '{value}' for field '{field}' in {message} message.")]
    UnknownName {
        message: &'static str,
        field: &'static str,
        value: String,
    },
    /// A field was given a value its type cannot encode.
    #[error("Field '{field}' in {message} message: {source}")]
    Value {
        message: &'static str,
        field: &'static str,
        source: ValueError,
    },
}

/// A set of named field values for one data record.
///
/// Values are keyed by schema field name; names outside the record's schema
/// are ignored. Supplying a value twice replaces the earlier one.
#[derive(Debug, Default, Clone)]
pub struct Values(BTreeMap<&'static str, Value>);

impl Values {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a field value.
    pub fn set(&mut self, name: &'static str, value: impl Into<Value>) {
        self.0.insert(name, value.into());
    }

    /// Builder-style [`Values::set`].
    pub fn with(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Retrieve a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

bitfield! {
    struct RecordHeader(u8) {
        [0..4] local_message: u8,
        [6] is_definition,
    }
}

/// The leading byte of a record: the local number in the low bits, with
/// bit six marking a definition.
fn header_byte(local_number: u8, is_definition: bool) -> u8 {
    let mut header = RecordHeader(0);
    header.set_local_message(local_number & 0xF);
    header.set_is_definition(is_definition);
    header.0
}

#[repr(C, packed)]
#[derive(IntoBytes, Immutable)]
struct DefinitionPreamble {
    reserved: u8,
    architecture: u8,
    global_message: U16Be,
    field_count: u8,
}

/// Assemble the definition record announcing a message kind's layout under
/// a local number.
pub fn definition_message(kind: MessageKind, local_number: u8) -> Vec<u8> {
    let schema = kind.schema();

    let mut r = Vec::with_capacity(definition_message_size(kind));
    r.push(header_byte(local_number, true));

    let preamble = DefinitionPreamble {
        reserved: 0x00,
        architecture: 0x01, // Big endian
        global_message: U16Be::new(schema.global),
        field_count: schema.fields.len() as u8,
    };
    r.extend_from_slice(preamble.as_bytes());

    for field in schema.fields {
        r.push(field.id);
        r.push(field.kind.byte_count());
        r.push(field.kind.base_type());
    }

    r
}

/// Assemble a data record from a value set.
///
/// Fields are encoded in schema order: a missing required field is
/// rejected, a missing optional field emits its sentinel, and symbolic
/// fields resolve their name through the schema's table before encoding.
pub fn data_message(
    kind: MessageKind,
    local_number: u8,
    values: &Values,
) -> Result<Vec<u8>, EncodeError> {
    let schema = kind.schema();

    let mut r = Vec::with_capacity(data_message_size(kind));
    r.push(header_byte(local_number, false));

    for field in schema.fields {
        let Some(value) = values.get(field.name) else {
            if field.required {
                return Err(EncodeError::MissingField {
                    message: schema.name,
                    field: field.name,
                });
            }

            r.extend_from_slice(&field.kind.default_bytes());
            continue;
        };

        let resolved;
        let value = match field.table {
            Some(table) => {
                let number = value
                    .as_text()
                    .and_then(|name| profile::lookup(table, name))
                    .ok_or_else(|| EncodeError::UnknownName {
                        message: schema.name,
                        field: field.name,
                        value: match value {
                            Value::Text(name) => name.clone(),
                            other => format!("{other:?}"),
                        },
                    })?;

                resolved = Value::Uint(number.into());
                &resolved
            }
            None => value,
        };

        let encoded = field.kind.encode(value).map_err(|source| EncodeError::Value {
            message: schema.name,
            field: field.name,
            source,
        })?;
        r.extend_from_slice(&encoded);
    }

    Ok(r)
}

/// The encoded size of a message kind's definition record.
pub fn definition_message_size(kind: MessageKind) -> usize {
    6 + 3 * kind.schema().fields.len()
}

/// The encoded size of a message kind's data record.
pub fn data_message_size(kind: MessageKind) -> usize {
    let fields = kind.schema().fields;
    1 + fields.iter().map(|f| f.kind.byte_count() as usize).sum::<usize>()
}

#[repr(C, packed)]
#[derive(IntoBytes, Immutable)]
struct FileHeader {
    header_size: u8,
    protocol_version: u8,
    profile_version: U16Le,
    data_size: U32Le,
    data_type: [u8; 4],
    checksum: U16Le,
}

/// Assemble the 14-byte document header.
///
/// `data_byte_count` declares the size of the record section: everything
/// between this header and the check trailer. The header checksum field is
/// always written as zero.
pub fn file_header(data_byte_count: u32) -> [u8; 14] {
    let header = FileHeader {
        header_size: 14,
        protocol_version: PROTOCOL_VERSION,
        profile_version: U16Le::new(PROFILE_VERSION),
        data_size: U32Le::new(data_byte_count),
        data_type: *b".FIT",
        checksum: U16Le::new(0),
    };

    zerocopy::transmute!(header)
}

/// Assemble the little-endian check trailer.
pub fn crc_trailer(crc: u16) -> [u8; 2] {
    crc.to_le_bytes()
}
