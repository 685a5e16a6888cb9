// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # xdfcodec
//!
//! Writer for XDF (Extensible Data Format) recordings: many time-stamped
//! sample streams multiplexed into one chunked, crash-tolerant file.
//!
//! ## Architecture
//!
//! - `core/` - Errors, element types, the stream registry, format versions
//! - `io/formats/xdf/` - Chunk framing, sample encoding and the writer
//! - `io/writer/` - Writer configuration and builder
//! - `io/detection.rs` - Magic number checks
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use xdfcodec::{ElementType, FormatVersion, StreamFooter, XdfWriter};
//!
//! let mut writer = XdfWriter::create("rec.xdf", FormatVersion::V1_1)?;
//! writer.register_stream(1, "<info><name>Markers</name></info>", 1, ElementType::String, "Markers")?;
//! let recorder = writer.start_recording();
//!
//! let mut footer = StreamFooter::new();
//! let timestamps = [1.5, 2.5];
//! recorder.write_samples(1, &timestamps, &["start", "stop"])?;
//! footer.observe(&timestamps);
//!
//! recorder.write_stream_footer(1, &footer.to_xml())?;
//! recorder.finish()?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    ElementType, FormatVersion, Result, SampleLayout, StreamInfo, StreamRegistry, XdfError,
};

// I/O (detection, formats, writer construction)
pub mod io;

pub use io::formats::xdf::{
    ChunkTag, ClockOffset, SampleValue, StreamFooter, TimestampElider, WriterStats, XdfRecorder,
    XdfWriter,
};
pub use io::writer::{WriterBuilder, WriterConfig};
