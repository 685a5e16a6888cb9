// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Primitive XDF encoders.
//!
//! All multi-byte values are little-endian. Everything here appends to an
//! in-memory buffer; nothing touches the output file.

use byteorder::{ByteOrder, LittleEndian};

use super::constants::{SAMPLE_COUNT_WIDTH, TS_OMITTED, TS_PRESENT};
use crate::core::ElementType;

/// Extend `buf` by `n` zero bytes and return the offset of the new region.
#[inline]
fn grow(buf: &mut Vec<u8>, n: usize) -> usize {
    let start = buf.len();
    buf.resize(start + n, 0);
    start
}

/// Append a little-endian u32.
pub fn put_u32(buf: &mut Vec<u8>, value: u32) {
    let start = grow(buf, 4);
    LittleEndian::write_u32(&mut buf[start..], value);
}

/// Append a little-endian u64.
pub fn put_u64(buf: &mut Vec<u8>, value: u64) {
    let start = grow(buf, 8);
    LittleEndian::write_u64(&mut buf[start..], value);
}

/// Append a little-endian u16.
pub fn put_u16(buf: &mut Vec<u8>, value: u16) {
    let start = grow(buf, 2);
    LittleEndian::write_u16(&mut buf[start..], value);
}

/// Append a little-endian f64.
pub fn put_f64(buf: &mut Vec<u8>, value: f64) {
    let start = grow(buf, 8);
    LittleEndian::write_f64(&mut buf[start..], value);
}

/// Encoded size of a variable-length integer, marker byte included.
pub fn varlen_int_len(value: u64) -> usize {
    if value <= u8::MAX as u64 {
        2
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Append a variable-length integer: a width byte (1, 4 or 8) followed by
/// the value in that many bytes.
pub fn write_varlen_int(buf: &mut Vec<u8>, value: u64) {
    if value <= u8::MAX as u64 {
        buf.push(1);
        buf.push(value as u8);
    } else if value <= u32::MAX as u64 {
        buf.push(4);
        put_u32(buf, value as u32);
    } else {
        buf.push(8);
        put_u64(buf, value);
    }
}

/// Reserve a fixed-width (4 byte) count field and return its offset.
///
/// The field is a valid variable-length integer of width 4 whatever value is
/// patched in later, so the payload length never changes.
pub fn reserve_count(buf: &mut Vec<u8>) -> usize {
    let offset = buf.len();
    buf.push(SAMPLE_COUNT_WIDTH);
    put_u32(buf, 0x0FFF_FFFF);
    offset
}

/// Overwrite a count field reserved with [`reserve_count`].
pub fn patch_count(buf: &mut [u8], offset: usize, count: u32) {
    LittleEndian::write_u32(&mut buf[offset + 1..offset + 5], count);
}

/// Append a per-sample timestamp: marker `0` for a deduced timestamp,
/// otherwise marker `8` and the f64 value.
pub fn write_timestamp(buf: &mut Vec<u8>, timestamp: f64) {
    if timestamp == 0.0 {
        buf.push(TS_OMITTED);
    } else {
        buf.push(TS_PRESENT);
        put_f64(buf, timestamp);
    }
}

/// Append a length-prefixed byte string, no terminator.
pub fn write_text(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_varlen_int(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// A value that can be stored in a sample chunk.
///
/// The element type is a property of the Rust type, so a block's type can be
/// checked against the stream's declaration before anything is encoded.
pub trait SampleValue {
    /// Declared element type this Rust type encodes as.
    const ELEMENT_TYPE: ElementType;

    /// Append one value.
    fn write_to(&self, buf: &mut Vec<u8>);

    /// Append a contiguous run of values.
    fn write_run(values: &[Self], buf: &mut Vec<u8>)
    where
        Self: Sized,
    {
        for value in values {
            value.write_to(buf);
        }
    }
}

macro_rules! impl_numeric_sample {
    ($ty:ty, $elem:expr, $write:ident, $write_into:ident) => {
        impl SampleValue for $ty {
            const ELEMENT_TYPE: ElementType = $elem;

            #[inline]
            fn write_to(&self, buf: &mut Vec<u8>) {
                let start = grow(buf, std::mem::size_of::<$ty>());
                LittleEndian::$write(&mut buf[start..], *self);
            }

            fn write_run(values: &[Self], buf: &mut Vec<u8>) {
                let start = grow(buf, std::mem::size_of_val(values));
                LittleEndian::$write_into(values, &mut buf[start..]);
            }
        }
    };
}

impl_numeric_sample!(i16, ElementType::Int16, write_i16, write_i16_into);
impl_numeric_sample!(i32, ElementType::Int32, write_i32, write_i32_into);
impl_numeric_sample!(i64, ElementType::Int64, write_i64, write_i64_into);
impl_numeric_sample!(f32, ElementType::Float32, write_f32, write_f32_into);
impl_numeric_sample!(f64, ElementType::Double64, write_f64, write_f64_into);

impl SampleValue for i8 {
    const ELEMENT_TYPE: ElementType = ElementType::Int8;

    #[inline]
    fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(*self as u8);
    }

    fn write_run(values: &[Self], buf: &mut Vec<u8>) {
        buf.extend_from_slice(bytemuck::cast_slice(values));
    }
}

impl SampleValue for String {
    const ELEMENT_TYPE: ElementType = ElementType::String;

    fn write_to(&self, buf: &mut Vec<u8>) {
        write_text(buf, self.as_bytes());
    }
}

impl SampleValue for &str {
    const ELEMENT_TYPE: ElementType = ElementType::String;

    fn write_to(&self, buf: &mut Vec<u8>) {
        write_text(buf, self.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varlen_int_widths() {
        let mut buf = Vec::new();
        write_varlen_int(&mut buf, 0x7F);
        assert_eq!(buf, vec![1, 0x7F]);

        buf.clear();
        write_varlen_int(&mut buf, 0xFF);
        assert_eq!(buf, vec![1, 0xFF]);

        buf.clear();
        write_varlen_int(&mut buf, 0x100);
        assert_eq!(buf, vec![4, 0x00, 0x01, 0x00, 0x00]);

        buf.clear();
        write_varlen_int(&mut buf, 0x1_0000_0000);
        assert_eq!(buf, vec![8, 0, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_varlen_int_len_matches_encoding() {
        for value in [0u64, 255, 256, u32::MAX as u64, u32::MAX as u64 + 1] {
            let mut buf = Vec::new();
            write_varlen_int(&mut buf, value);
            assert_eq!(buf.len(), varlen_int_len(value), "value {value}");
        }
    }

    #[test]
    fn test_reserve_and_patch_count() {
        let mut buf = vec![0xAA];
        let offset = reserve_count(&mut buf);
        assert_eq!(offset, 1);
        assert_eq!(buf.len(), 6);

        patch_count(&mut buf, offset, 0x0102_0304);
        assert_eq!(buf, vec![0xAA, 4, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_timestamp_encoding() {
        let mut buf = Vec::new();
        write_timestamp(&mut buf, 0.0);
        assert_eq!(buf, vec![0]);

        buf.clear();
        write_timestamp(&mut buf, 5.1);
        assert_eq!(buf[0], 8);
        assert_eq!(&buf[1..], &5.1f64.to_le_bytes());
    }

    #[test]
    fn test_text_longer_than_one_byte_length() {
        let text = "x".repeat(300);
        let mut buf = Vec::new();
        write_text(&mut buf, text.as_bytes());
        assert_eq!(&buf[..5], &[4, 0x2C, 0x01, 0, 0]);
        assert_eq!(buf.len(), 5 + 300);
    }

    #[test]
    fn test_numeric_runs_are_little_endian() {
        let mut buf = Vec::new();
        i16::write_run(&[1, -2], &mut buf);
        assert_eq!(buf, vec![0x01, 0x00, 0xFE, 0xFF]);

        buf.clear();
        i8::write_run(&[-1, 5], &mut buf);
        assert_eq!(buf, vec![0xFF, 0x05]);

        buf.clear();
        f64::write_run(&[f64::MIN_POSITIVE, -0.0], &mut buf);
        assert_eq!(&buf[..8], &f64::MIN_POSITIVE.to_le_bytes());
        assert_eq!(&buf[8..], &(-0.0f64).to_le_bytes());
    }

    #[test]
    fn test_single_value_matches_run() {
        let values = [1.5f32, -3.25, 1e-30];
        let mut run = Vec::new();
        f32::write_run(&values, &mut run);

        let mut single = Vec::new();
        for v in &values {
            v.write_to(&mut single);
        }
        assert_eq!(run, single);
    }

    #[test]
    fn test_string_and_str_encode_alike() {
        let mut a = Vec::new();
        "Hello".write_to(&mut a);
        let mut b = Vec::new();
        String::from("Hello").write_to(&mut b);
        assert_eq!(a, b);
        assert_eq!(a, vec![1, 5, b'H', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn test_element_types() {
        assert_eq!(<i8 as SampleValue>::ELEMENT_TYPE, ElementType::Int8);
        assert_eq!(<i64 as SampleValue>::ELEMENT_TYPE, ElementType::Int64);
        assert_eq!(<f32 as SampleValue>::ELEMENT_TYPE, ElementType::Float32);
        assert_eq!(<&str as SampleValue>::ELEMENT_TYPE, ElementType::String);
    }
}
