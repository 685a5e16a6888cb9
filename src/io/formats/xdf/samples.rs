// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sample block encoders.
//!
//! A sample block is a batch of rows, each one timestamp plus exactly
//! `channel_count` values. Two payload layouts exist and a writer uses
//! exactly one of them for its whole lifetime:
//!
//! **Legacy** (tag 3):
//! - sample count (variable-length integer, always width 4)
//! - per row: timestamp marker (`0` or `8`), optional f64 timestamp, values
//!
//! **Optimized** (tag 7):
//! - sample count (u32)
//! - channel count (u32)
//! - element type code (u8)
//! - one f64 timestamp per row
//! - all values, row-major
//!
//! Every check happens before encoding starts, so a rejected block never
//! produces a partial payload.

use super::codec::{patch_count, put_u32, reserve_count, write_timestamp, SampleValue};
use super::constants::{
    ChunkTag, DEDUCED_TIMESTAMP, MAX_SAMPLES_PER_CHUNK, SAMPLES_V2_HEADER_LEN,
};
use crate::core::{Result, SampleLayout, StreamInfo, XdfError};

/// A fully built sample chunk payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBlock {
    /// Chunk tag matching the payload layout
    pub tag: ChunkTag,
    /// Payload bytes, ready for framing
    pub payload: Vec<u8>,
    /// Rows in the block
    pub rows: usize,
}

/// Encoder for one sample layout, chosen once per writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleEncoder {
    layout: SampleLayout,
}

impl SampleEncoder {
    /// Create an encoder for the given layout.
    pub fn new(layout: SampleLayout) -> Self {
        Self { layout }
    }

    /// Layout this encoder produces.
    pub fn layout(&self) -> SampleLayout {
        self.layout
    }

    /// Chunk tag this encoder produces.
    pub fn tag(&self) -> ChunkTag {
        match self.layout {
            SampleLayout::Legacy => ChunkTag::Samples,
            SampleLayout::Optimized => ChunkTag::SamplesV2,
        }
    }

    /// Encode rows given as one flat row-major slice.
    ///
    /// Returns `None` for an empty block.
    pub fn encode<T: SampleValue>(
        &self,
        stream: &StreamInfo,
        timestamps: &[f64],
        values: &[T],
    ) -> Result<Option<EncodedBlock>> {
        stream.check_type(T::ELEMENT_TYPE)?;
        let n_channels = stream.channel_count as usize;
        if n_channels == 0 {
            return Err(XdfError::shape_mismatch(
                stream.stream_id,
                "stream has no channels",
            ));
        }
        if values.len() != timestamps.len() * n_channels {
            return Err(XdfError::shape_mismatch(
                stream.stream_id,
                format!(
                    "{} values for {} timestamps x {} channels",
                    values.len(),
                    timestamps.len(),
                    n_channels
                ),
            ));
        }
        if timestamps.is_empty() {
            return Ok(None);
        }
        check_row_count(timestamps.len())?;

        let payload = match self.layout {
            SampleLayout::Legacy => {
                encode_legacy(stream, timestamps, values.chunks_exact(n_channels))
            }
            SampleLayout::Optimized => {
                let mut buf = optimized_header::<T>(stream, timestamps);
                T::write_run(values, &mut buf);
                buf
            }
        };

        Ok(Some(EncodedBlock {
            tag: self.tag(),
            payload,
            rows: timestamps.len(),
        }))
    }

    /// Encode rows given as one buffer per row.
    ///
    /// Returns `None` for an empty block.
    pub fn encode_rows<T: SampleValue, R: AsRef<[T]>>(
        &self,
        stream: &StreamInfo,
        timestamps: &[f64],
        rows: &[R],
    ) -> Result<Option<EncodedBlock>> {
        stream.check_type(T::ELEMENT_TYPE)?;
        if rows.len() != timestamps.len() {
            return Err(XdfError::shape_mismatch(
                stream.stream_id,
                format!("{} rows for {} timestamps", rows.len(), timestamps.len()),
            ));
        }
        let n_channels = stream.channel_count as usize;
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != n_channels)
        {
            return Err(XdfError::shape_mismatch(
                stream.stream_id,
                format!(
                    "row {index} has {} values, stream has {n_channels} channels",
                    row.as_ref().len()
                ),
            ));
        }
        if rows.is_empty() {
            return Ok(None);
        }
        check_row_count(rows.len())?;

        let payload = match self.layout {
            SampleLayout::Legacy => {
                encode_legacy(stream, timestamps, rows.iter().map(|row| row.as_ref()))
            }
            SampleLayout::Optimized => {
                let mut buf = optimized_header::<T>(stream, timestamps);
                for row in rows {
                    T::write_run(row.as_ref(), &mut buf);
                }
                buf
            }
        };

        Ok(Some(EncodedBlock {
            tag: self.tag(),
            payload,
            rows: rows.len(),
        }))
    }
}

fn check_row_count(rows: usize) -> Result<()> {
    if rows as u64 > MAX_SAMPLES_PER_CHUNK {
        return Err(XdfError::CountOverflow {
            count: rows,
            max: MAX_SAMPLES_PER_CHUNK,
        });
    }
    Ok(())
}

/// Rough payload size, used only to pre-size buffers.
fn estimate_len<T: SampleValue>(stream: &StreamInfo, rows: usize) -> usize {
    let value_len = T::ELEMENT_TYPE.size().unwrap_or(8);
    rows * (9 + value_len * stream.channel_count as usize) + 16
}

fn encode_legacy<'a, T, I>(stream: &StreamInfo, timestamps: &[f64], rows: I) -> Vec<u8>
where
    T: SampleValue + 'a,
    I: Iterator<Item = &'a [T]>,
{
    let mut buf = Vec::with_capacity(estimate_len::<T>(stream, timestamps.len()));
    let count_offset = reserve_count(&mut buf);
    for (&timestamp, row) in timestamps.iter().zip(rows) {
        write_timestamp(&mut buf, timestamp);
        T::write_run(row, &mut buf);
    }
    // Row count was checked against MAX_SAMPLES_PER_CHUNK.
    patch_count(&mut buf, count_offset, timestamps.len() as u32);
    buf
}

fn optimized_header<T: SampleValue>(stream: &StreamInfo, timestamps: &[f64]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(
        SAMPLES_V2_HEADER_LEN + estimate_len::<T>(stream, timestamps.len()),
    );
    put_u32(&mut buf, timestamps.len() as u32);
    put_u32(&mut buf, stream.channel_count);
    buf.push(T::ELEMENT_TYPE.code());
    f64::write_run(timestamps, &mut buf);
    buf
}

/// Replaces timestamps a reader can deduce from the nominal sampling rate.
///
/// A timestamp is deducible when it is exactly the previous timestamp plus
/// one sampling interval. Deducible timestamps are replaced with
/// [`DEDUCED_TIMESTAMP`], which the legacy layout stores as a single marker
/// byte instead of nine bytes.
#[derive(Debug, Clone)]
pub struct TimestampElider {
    interval: Option<f64>,
    last: Option<f64>,
}

impl TimestampElider {
    /// Create an elider for a stream with the given nominal rate in Hz.
    ///
    /// Irregular streams (rate `<= 0`) never elide.
    pub fn new(nominal_srate: f64) -> Self {
        let interval = (nominal_srate > 0.0).then(|| 1.0 / nominal_srate);
        Self {
            interval,
            last: None,
        }
    }

    /// Elide deducible timestamps in place and return how many were elided.
    pub fn elide(&mut self, timestamps: &mut [f64]) -> usize {
        let Some(interval) = self.interval else {
            return 0;
        };
        let mut elided = 0;
        for ts in timestamps.iter_mut() {
            let actual = *ts;
            if let Some(last) = self.last {
                if last + interval == actual {
                    *ts = DEDUCED_TIMESTAMP;
                    elided += 1;
                }
            }
            self.last = Some(actual);
        }
        elided
    }
}
