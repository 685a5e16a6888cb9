// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.
//!
//! A minimal XDF chunk walker and sample decoder, written against the file
//! layout rather than the writer's internals.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use byteorder::{LittleEndian, ReadBytesExt};
use xdfcodec::ElementType;

// ============================================================================
// Temporary files
// ============================================================================

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Get a unique temporary directory for test files.
pub fn temp_dir(prefix: &str) -> PathBuf {
    // Tests in one binary run in parallel and share the process id.
    let seq = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    std::env::temp_dir().join(format!(
        "xdfcodec_{}_{}_{}_{}",
        prefix,
        std::process::id(),
        seq,
        random
    ))
}

/// Create a temporary file path and a cleanup guard for its directory.
pub fn temp_xdf_path(name: &str) -> (PathBuf, CleanupGuard) {
    let dir = temp_dir(name);
    fs::create_dir_all(&dir).ok();
    let path = dir.join(format!("{}.xdf", name));
    (path, CleanupGuard(dir))
}

/// Removes a temporary directory when dropped.
#[derive(Debug)]
pub struct CleanupGuard(pub PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Chunk walking
// ============================================================================

/// One parsed chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// File offset of the chunk's length field
    pub offset: usize,
    pub tag: u16,
    pub stream_id: Option<u32>,
    pub payload: Vec<u8>,
}

/// Result of walking a file.
#[derive(Debug)]
pub struct Walk {
    pub chunks: Vec<Chunk>,
    /// Bytes after the last complete chunk
    pub trailing: usize,
}

fn has_stream_id(tag: u16) -> bool {
    !matches!(tag, 1 | 5)
}

fn read_varlen(cursor: &mut Cursor<&[u8]>) -> Option<u64> {
    match cursor.read_u8().ok()? {
        1 => cursor.read_u8().ok().map(u64::from),
        4 => cursor.read_u32::<LittleEndian>().ok().map(u64::from),
        8 => cursor.read_u64::<LittleEndian>().ok(),
        width => panic!("invalid variable-length integer width {width}"),
    }
}

/// Walk every complete chunk after the magic. Stops at the first chunk
/// whose declared length runs past the end of the data.
pub fn walk(bytes: &[u8]) -> Walk {
    assert_eq!(&bytes[..4], b"XDF:", "missing magic");

    let mut chunks = Vec::new();
    let mut cursor = Cursor::new(bytes);
    cursor.set_position(4);
    let mut consumed = 4;

    while consumed < bytes.len() {
        let Some(len) = read_varlen(&mut cursor) else {
            break;
        };
        let body_start = cursor.position() as usize;
        let end = body_start + len as usize;
        if end > bytes.len() {
            break;
        }
        let tag = cursor.read_u16::<LittleEndian>().unwrap();
        let stream_id = has_stream_id(tag).then(|| cursor.read_u32::<LittleEndian>().unwrap());
        let payload_start = cursor.position() as usize;
        chunks.push(Chunk {
            offset: consumed,
            tag,
            stream_id,
            payload: bytes[payload_start..end].to_vec(),
        });
        cursor.set_position(end as u64);
        consumed = end;
    }

    Walk {
        chunks,
        trailing: bytes.len() - consumed,
    }
}

/// Walk a file on disk, requiring it to end on a chunk boundary.
pub fn read_chunks<P: AsRef<Path>>(path: P) -> Vec<Chunk> {
    let bytes = fs::read(path).unwrap();
    let walk = walk(&bytes);
    assert_eq!(walk.trailing, 0, "file does not end on a chunk boundary");
    walk.chunks
}

/// Chunks with the given tag.
pub fn with_tag(chunks: &[Chunk], tag: u16) -> Vec<&Chunk> {
    chunks.iter().filter(|c| c.tag == tag).collect()
}

// ============================================================================
// Sample decoding
// ============================================================================

/// A decoded channel value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    /// Raw IEEE-754 bits, so comparisons are bit-exact
    Float(u64),
    Text(String),
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v.to_bits())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v).to_bits())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// A decoded row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: f64,
    pub values: Vec<Value>,
}

fn read_value(cursor: &mut Cursor<&[u8]>, element_type: ElementType) -> Value {
    match element_type {
        ElementType::Float32 => {
            Value::Float(f64::from(cursor.read_f32::<LittleEndian>().unwrap()).to_bits())
        }
        ElementType::Double64 => Value::Float(cursor.read_f64::<LittleEndian>().unwrap().to_bits()),
        ElementType::Int8 => Value::Int(cursor.read_i8().unwrap().into()),
        ElementType::Int16 => Value::Int(cursor.read_i16::<LittleEndian>().unwrap().into()),
        ElementType::Int32 => Value::Int(cursor.read_i32::<LittleEndian>().unwrap().into()),
        ElementType::Int64 => Value::Int(cursor.read_i64::<LittleEndian>().unwrap()),
        ElementType::String => {
            let len = read_varlen(cursor).unwrap() as usize;
            let mut text = vec![0u8; len];
            cursor.read_exact(&mut text).unwrap();
            Value::Text(String::from_utf8(text).unwrap())
        }
    }
}

/// Decode a tag 3 payload. Deduced timestamps decode as `0.0`.
pub fn decode_legacy(payload: &[u8], element_type: ElementType, channels: usize) -> Vec<Row> {
    let mut cursor = Cursor::new(payload);
    let count = read_varlen(&mut cursor).unwrap() as usize;
    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let timestamp = match cursor.read_u8().unwrap() {
            0 => 0.0,
            8 => cursor.read_f64::<LittleEndian>().unwrap(),
            marker => panic!("invalid timestamp marker {marker}"),
        };
        let values = (0..channels)
            .map(|_| read_value(&mut cursor, element_type))
            .collect();
        rows.push(Row { timestamp, values });
    }
    assert_eq!(cursor.position() as usize, payload.len(), "trailing payload bytes");
    rows
}

/// Decode a tag 7 payload. The element type and channel count come from the
/// payload itself.
pub fn decode_optimized(payload: &[u8]) -> (ElementType, usize, Vec<Row>) {
    let mut cursor = Cursor::new(payload);
    let count = cursor.read_u32::<LittleEndian>().unwrap() as usize;
    let channels = cursor.read_u32::<LittleEndian>().unwrap() as usize;
    let element_type = ElementType::from_code(cursor.read_u8().unwrap()).unwrap();

    let timestamps: Vec<f64> = (0..count)
        .map(|_| cursor.read_f64::<LittleEndian>().unwrap())
        .collect();
    let rows = timestamps
        .into_iter()
        .map(|timestamp| Row {
            timestamp,
            values: (0..channels)
                .map(|_| read_value(&mut cursor, element_type))
                .collect(),
        })
        .collect();
    assert_eq!(cursor.position() as usize, payload.len(), "trailing payload bytes");
    (element_type, channels, rows)
}

/// Decode any samples chunk.
pub fn decode_samples(chunk: &Chunk, element_type: ElementType, channels: usize) -> Vec<Row> {
    match chunk.tag {
        3 => decode_legacy(&chunk.payload, element_type, channels),
        7 => {
            let (found_type, found_channels, rows) = decode_optimized(&chunk.payload);
            assert_eq!(found_type, element_type);
            assert_eq!(found_channels, channels);
            rows
        }
        tag => panic!("chunk with tag {tag} is not a samples chunk"),
    }
}

/// Build expected rows from timestamps and flat row-major values.
pub fn expected_rows<V: Into<Value> + Clone>(
    timestamps: &[f64],
    values: &[V],
    channels: usize,
) -> Vec<Row> {
    timestamps
        .iter()
        .zip(values.chunks(channels))
        .map(|(&timestamp, row)| Row {
            timestamp,
            values: row.iter().cloned().map(Into::into).collect(),
        })
        .collect()
}
