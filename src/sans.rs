//! Sans-I/O primitives for assembling protocol records.
//!
//! This module builds individual byte sequences — file headers, definition
//! and data records, the trailing check value — without touching a sink.
//! See [`crate::avec`] for a writer that sequences them into a complete
//! document.
//!
//! # Architecture
//!
//! Encoding is layered bottom-up:
//!
//! - [`codec`] converts integers and fixed-width text to and from raw
//! bytes, applying two's-complement and truncation/padding rules.
//!
//! - [`types`] defines the field types of the protocol profile: each
//! carries a base-type tag, a byte width, a sentinel "invalid" pattern,
//! and a value transform (timestamps, semicircle angles, scaled lengths).
//!
//! - [`profile`] holds the closed name-to-number tables for symbolic
//! fields (event kinds, sports, course point types).
//!
//! - [`schema`] fixes the global number and ordered field list of every
//! supported message kind. Schemas are static configuration data; the
//! field order in a definition record and its data records comes from
//! here, so the two always agree.
//!
//! - [`record`] assembles whole records from a schema and a set of field
//! values, and renders the document header and check trailer.
//!
//! Callers are responsible for sequencing: a data record is only
//! interpretable after a definition record with the same local number, and
//! every record byte (but not the document header) must feed the running
//! check from the [`check`] module.

pub mod check;
pub mod codec;
pub mod profile;
pub mod record;
pub mod schema;
pub mod types;
