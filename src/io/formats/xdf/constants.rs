// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XDF format constants.
//!
//! Magic bytes, chunk tags and fixed payloads as laid out in the
//! [XDF specification](https://github.com/sccn/xdf/wiki/Specifications).

use uuid::Uuid;

/// XDF file magic bytes (start of file only).
pub const XDF_MAGIC: [u8; 4] = *b"XDF:";

/// Chunk tag, written as a little-endian u16 after the chunk length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ChunkTag {
    /// File header, written once right after the magic
    FileHeader = 1,
    /// Stream header, precedes every other chunk of its stream
    StreamHeader = 2,
    /// Samples, per-row framed layout
    Samples = 3,
    /// Clock offset measurement
    ClockOffset = 4,
    /// Resynchronization marker
    Boundary = 5,
    /// Stream footer, last chunk of its stream
    StreamFooter = 6,
    /// Samples, columnar layout
    SamplesV2 = 7,
}

impl ChunkTag {
    /// Numeric tag value.
    pub const fn value(self) -> u16 {
        self as u16
    }

    /// Look up a tag by its numeric value.
    pub fn from_value(value: u16) -> Option<Self> {
        Some(match value {
            1 => ChunkTag::FileHeader,
            2 => ChunkTag::StreamHeader,
            3 => ChunkTag::Samples,
            4 => ChunkTag::ClockOffset,
            5 => ChunkTag::Boundary,
            6 => ChunkTag::StreamFooter,
            7 => ChunkTag::SamplesV2,
            _ => return None,
        })
    }

    /// Whether chunks with this tag carry a stream id after the tag.
    pub const fn has_stream_id(self) -> bool {
        !matches!(self, ChunkTag::FileHeader | ChunkTag::Boundary)
    }
}

/// Width of the tag field.
pub const TAG_LEN: usize = 2;

/// Width of the stream id field.
pub const STREAM_ID_LEN: usize = 4;

/// Payload of every boundary chunk.
pub const BOUNDARY_UUID: Uuid = Uuid::from_bytes([
    0x43, 0xA5, 0x46, 0xDC, 0xCB, 0xF5, 0x41, 0x0F, 0xB3, 0x0E, 0xD5, 0x46, 0x73, 0x83, 0xCB, 0xE4,
]);

/// Timestamp marker: no timestamp, reader deduces it from the nominal rate.
pub const TS_OMITTED: u8 = 0;

/// Timestamp marker: an 8-byte f64 timestamp follows.
pub const TS_PRESENT: u8 = 8;

/// Timestamp value callers pass to request omission.
pub const DEDUCED_TIMESTAMP: f64 = 0.0;

/// Width of the reserved sample-count field in legacy sample chunks.
pub const SAMPLE_COUNT_WIDTH: u8 = 4;

/// Largest row count a single sample chunk can carry.
pub const MAX_SAMPLES_PER_CHUNK: u64 = u32::MAX as u64;

/// Payload length of a clock offset chunk (two f64).
pub const CLOCK_OFFSET_LEN: usize = 16;

/// Size of the fixed header of a columnar sample chunk.
pub const SAMPLES_V2_HEADER_LEN: usize = 4 + 4 + 1;
