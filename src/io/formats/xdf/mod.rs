// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XDF (Extensible Data Format) support.
//!
//! An XDF file is the magic `XDF:` followed by a sequence of chunks, each
//! framed by its own length so readers can skip what they do not understand
//! and recover after a truncated write.
//!
//! - [`constants`]: magic, chunk tags, boundary UUID
//! - [`codec`]: variable-length integers and sample value encoding
//! - [`framer`]: chunk framing over one locked sink
//! - [`samples`]: sample block encoding for both layouts
//! - [`footer`]: stream footer summaries
//! - [`writer`]: the two-phase file writer

pub mod codec;
pub mod constants;
pub mod footer;
pub mod framer;
pub mod samples;
pub mod writer;

pub use codec::SampleValue;
pub use constants::{ChunkTag, BOUNDARY_UUID, XDF_MAGIC};
pub use footer::{ClockOffset, StreamFooter};
pub use framer::WriterStats;
pub use samples::{SampleEncoder, TimestampElider};
pub use writer::{XdfRecorder, XdfWriter};
