//! BER (ITU-T X.690) scalar codec
//!
//! This crate encodes and decodes individual BER fields: identifier (tag)
//! octets, length octets, integers, booleans, floating-point and decimal
//! values, strings, and the date-and-time family with its textual, compact
//! binary, and extended binary wire formats.
//!
//! Each codec module exposes free `put_*` functions writing to a
//! [`ByteSink`](stream::ByteSink) and `get_*` functions reading from a
//! [`ByteSource`](stream::ByteSource). Encoded fields carry their own
//! length prefix where BER requires one; the tag octets of an enclosing
//! TLV are always the caller's concern.

pub mod boolean;
pub mod constants;
pub mod datetime;
pub mod float;
pub mod header;
pub mod integer;
pub mod length;
pub mod stream;
pub mod string;
pub mod tag;
pub mod timezone;

pub use length::Length;
pub use stream::{ByteSink, ByteSource, SliceSource};
pub use tag::{Tag, TagClass, TagType};
