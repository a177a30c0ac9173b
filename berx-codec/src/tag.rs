//! Identifier (tag) octet codec
//!
//! # Encoding Format
//!
//! The first octet packs the class into bits 8-7, the primitive/constructed
//! flag into bit 6, and the tag number into bits 5-1. Numbers up to 30 fit
//! there directly; larger numbers set those five bits to `11111` and follow
//! with a big-endian base-128 sequence, 7 value bits per octet, bit 8 set
//! on every octet but the last.

use berx_core::{BerError, BerResult};

use crate::constants::{MAX_TAG_NUMBER_OCTETS, TAG_VALUE_BITS_PER_OCTET};
use crate::stream::{ByteSink, ByteSource};

const MULTI_OCTET_MARKER: u8 = 0x1F;
const CONTINUATION_BIT: u8 = 0x80;

/// BER tag class (bits 8-7 of the first identifier octet)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    fn to_bits(self) -> u8 {
        match self {
            Self::Universal => 0b00,
            Self::Application => 0b01,
            Self::ContextSpecific => 0b10,
            Self::Private => 0b11,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Universal,
            0b01 => Self::Application,
            0b10 => Self::ContextSpecific,
            _ => Self::Private,
        }
    }
}

/// Primitive versus constructed flag (bit 6 of the first identifier octet)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    Primitive,
    Constructed,
}

/// A decoded BER identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub class: TagClass,
    pub tag_type: TagType,
    pub number: i32,
}

impl Tag {
    /// Constructs a tag; the number must be non-negative
    pub fn new(class: TagClass, tag_type: TagType, number: i32) -> BerResult<Self> {
        if number < 0 {
            return Err(BerError::InvalidData(format!(
                "Tag number must be non-negative, got {}",
                number
            )));
        }
        Ok(Self {
            class,
            tag_type,
            number,
        })
    }
}

/// Writes the identifier octets for `tag`
pub fn put_identifier_octets<S: ByteSink>(sink: &mut S, tag: &Tag) -> BerResult<()> {
    if tag.number < 0 {
        return Err(BerError::InvalidData(format!(
            "Tag number must be non-negative, got {}",
            tag.number
        )));
    }
    let type_bit = match tag.tag_type {
        TagType::Primitive => 0,
        TagType::Constructed => 1,
    };
    let leading = (tag.class.to_bits() << 6) | (type_bit << 5);

    if tag.number <= 30 {
        return sink.write_byte(leading | tag.number as u8);
    }

    sink.write_byte(leading | MULTI_OCTET_MARKER)?;
    let number = tag.number as u32;
    let octet_count =
        (32 - number.leading_zeros()).div_ceil(TAG_VALUE_BITS_PER_OCTET) as usize;
    for index in (0..octet_count).rev() {
        let shift = index as u32 * TAG_VALUE_BITS_PER_OCTET;
        let mut octet = ((number >> shift) & 0x7F) as u8;
        if index > 0 {
            octet |= CONTINUATION_BIT;
        }
        sink.write_byte(octet)?;
    }
    Ok(())
}

/// Reads the identifier octets of the next field
///
/// # Errors
///
/// Returns `Stream` if the source runs dry mid-identifier, and
/// `InvalidData` if a multi-octet tag number overflows `i32`.
pub fn get_identifier_octets<S: ByteSource>(source: &mut S) -> BerResult<Tag> {
    let first = source.read_byte()?;
    let class = TagClass::from_bits(first >> 6);
    let tag_type = if first & 0x20 != 0 {
        TagType::Constructed
    } else {
        TagType::Primitive
    };

    let low_bits = first & MULTI_OCTET_MARKER;
    if low_bits != MULTI_OCTET_MARKER {
        return Ok(Tag {
            class,
            tag_type,
            number: low_bits as i32,
        });
    }

    let mut number: u64 = 0;
    let mut count = 0;
    loop {
        count += 1;
        if count > MAX_TAG_NUMBER_OCTETS {
            return Err(BerError::InvalidData(
                "Tag number does not fit in 32 bits".to_string(),
            ));
        }
        let octet = source.read_byte()?;
        number = (number << TAG_VALUE_BITS_PER_OCTET) | (octet & 0x7F) as u64;
        if octet & CONTINUATION_BIT == 0 {
            break;
        }
    }
    if number > i32::MAX as u64 {
        return Err(BerError::InvalidData(
            "Tag number does not fit in 32 bits".to_string(),
        ));
    }

    Ok(Tag {
        class,
        tag_type,
        number: number as i32,
    })
}
