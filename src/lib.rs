#![no_std]

//! An efficient serializer for Garmin's Flexible and Interoperable Data
//! Transfer protocol.
//!
//! Rouleur assembles course and activity documents byte-by-byte: a file
//! header, interleaved definition and data records, and a trailing cyclic
//! redundancy check, bit-exact to what devices and platforms expect.
//!
//! Most users should begin with the [`avec`] module: typed per-document
//! options, plus a writer that sequences a complete document over any byte
//! sink. Applications needing finer control over internals (such as those
//! targeting an unusual transport) can assemble individual records from the
//! primitives in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the sink-based writer (default).

extern crate alloc;

pub mod avec;
pub mod sans;
