//! Core types for the berx BER (ITU-T X.690) scalar codec
//!
//! This crate provides the value-semantic types the codec encodes and
//! decodes (dates, times, datetimes with and without timezone offsets, a
//! decimal64 passthrough), the ISO-8601 text formatter/parser used for the
//! textual date-and-time wire formats, the encoder/decoder option records,
//! and the shared error type.
//!
//! The wire-format logic itself lives in the `berx-codec` crate; everything
//! here is plain data with validation on construction.

pub mod datatypes;
pub mod error;
pub mod iso8601;
pub mod options;

pub use error::{BerError, BerResult};
pub use options::{DecoderOptions, EncoderOptions};
pub use datatypes::{
    Date, DateOrDateTz, DateTz, Datetime, DatetimeOrDatetimeTz, DatetimeTz, Decimal64, Time,
    TimeOrTimeTz, TimeTz,
};
