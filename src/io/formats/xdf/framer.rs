// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Chunk framing and the shared output.
//!
//! Chunk layout:
//! - chunk length (variable-length integer, counts everything after itself)
//! - tag (u16)
//! - stream id (u32, only for tags with a stream context)
//! - payload
//!
//! The output sink lives behind a single mutex. A chunk's header and payload
//! are written while holding the guard, so chunks from different threads
//! never interleave; payloads are always fully built before the lock is
//! taken.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use super::codec::{put_u16, put_u32, varlen_int_len, write_varlen_int};
use super::constants::{ChunkTag, STREAM_ID_LEN, TAG_LEN};
use crate::core::{Result, XdfError};

/// Counters describing what a writer has emitted so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriterStats {
    /// Chunks emitted, file header included
    pub chunks_written: u64,
    /// Bytes handed to the sink, magic included
    pub bytes_written: u64,
}

struct Output<W> {
    sink: W,
    /// Absolute file offset of the next byte
    position: u64,
}

/// Serializes whole chunks onto one sink.
pub struct ChunkFramer<W: Write> {
    out: Mutex<Output<W>>,
    chunks_written: AtomicU64,
    bytes_written: AtomicU64,
    flush_each_chunk: bool,
}

impl<W: Write> ChunkFramer<W> {
    /// Wrap a sink whose next byte lands at `start_position`.
    pub fn new(sink: W, start_position: u64, flush_each_chunk: bool) -> Self {
        Self {
            out: Mutex::new(Output {
                sink,
                position: start_position,
            }),
            chunks_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            flush_each_chunk,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Output<W>>> {
        self.out
            .lock()
            .map_err(|e| XdfError::LockPoisoned(e.to_string()))
    }

    /// Write bytes that are not a chunk (the file magic).
    pub fn write_raw(&self, bytes: &[u8]) -> Result<()> {
        let mut out = self.lock()?;
        out.sink
            .write_all(bytes)
            .map_err(|e| XdfError::io("writing file magic", e))?;
        out.position += bytes.len() as u64;
        self.bytes_written
            .fetch_add(bytes.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    /// Emit one complete chunk and return the file offset it starts at.
    pub fn emit(&self, tag: ChunkTag, stream_id: Option<u32>, payload: &[u8]) -> Result<u64> {
        debug_assert_eq!(tag.has_stream_id(), stream_id.is_some());

        let header = chunk_header(tag, stream_id, payload.len());

        let mut out = self.lock()?;
        let offset = out.position;
        out.sink
            .write_all(&header)
            .and_then(|()| out.sink.write_all(payload))
            .map_err(|e| XdfError::io(format!("writing {tag:?} chunk"), e))?;
        if self.flush_each_chunk {
            out.sink
                .flush()
                .map_err(|e| XdfError::io("flushing output", e))?;
        }
        let total = (header.len() + payload.len()) as u64;
        out.position += total;
        drop(out);

        self.chunks_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(total, Ordering::Relaxed);
        tracing::trace!(?tag, ?stream_id, offset, len = total, "chunk written");

        Ok(offset)
    }

    /// Flush buffered bytes to the sink.
    pub fn flush(&self) -> Result<()> {
        self.lock()?
            .sink
            .flush()
            .map_err(|e| XdfError::io("flushing output", e))
    }

    /// Absolute file offset of the next chunk.
    pub fn position(&self) -> Result<u64> {
        Ok(self.lock()?.position)
    }

    /// Current counters.
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            chunks_written: self.chunks_written.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }

    /// Flush and return the sink.
    pub fn into_inner(self) -> Result<W> {
        let mut out = self
            .out
            .into_inner()
            .map_err(|e| XdfError::LockPoisoned(e.to_string()))?;
        out.sink
            .flush()
            .map_err(|e| XdfError::io("flushing output", e))?;
        Ok(out.sink)
    }
}

/// Encode the length, tag and optional stream id preceding a payload.
pub fn chunk_header(tag: ChunkTag, stream_id: Option<u32>, payload_len: usize) -> Vec<u8> {
    let id_len = if stream_id.is_some() { STREAM_ID_LEN } else { 0 };
    let len = (TAG_LEN + id_len + payload_len) as u64;

    let mut header = Vec::with_capacity(varlen_int_len(len) + TAG_LEN + id_len);
    write_varlen_int(&mut header, len);
    put_u16(&mut header, tag.value());
    if let Some(id) = stream_id {
        put_u32(&mut header, id);
    }
    header
}
