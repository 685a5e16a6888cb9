// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Stream registry.
//!
//! Maps a caller-chosen stream id to its declared shape. The registry is
//! only mutated while the writer is in its registering phase; once recording
//! starts it is frozen and shared read-only between writer threads, so it
//! needs no lock of its own.

use std::collections::HashMap;

use super::error::{Result, XdfError};
use super::value::ElementType;

/// Declared shape of a registered stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    /// Caller-chosen stream id
    pub stream_id: u32,
    /// Element type of every value
    pub element_type: ElementType,
    /// Values per sample
    pub channel_count: u32,
    /// Display name
    pub name: String,
    /// Stream header XML as written to the file
    pub header: String,
}

impl StreamInfo {
    /// Reject a block whose element type differs from the declared one.
    pub fn check_type(&self, actual: ElementType) -> Result<()> {
        if actual != self.element_type {
            return Err(XdfError::type_mismatch(
                self.stream_id,
                self.element_type,
                actual,
            ));
        }
        Ok(())
    }
}

/// Registry of declared streams, keyed by stream id.
#[derive(Debug, Default)]
pub struct StreamRegistry {
    streams: HashMap<u32, StreamInfo>,
}

impl StreamRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new stream. Fails if the id is taken.
    pub fn register(&mut self, info: StreamInfo) -> Result<&StreamInfo> {
        use std::collections::hash_map::Entry;

        match self.streams.entry(info.stream_id) {
            Entry::Occupied(_) => Err(XdfError::duplicate_stream(info.stream_id)),
            Entry::Vacant(slot) => Ok(slot.insert(info)),
        }
    }

    /// Look up a stream by id.
    pub fn lookup(&self, stream_id: u32) -> Result<&StreamInfo> {
        self.streams
            .get(&stream_id)
            .ok_or_else(|| XdfError::unknown_stream(stream_id))
    }

    /// Check if a stream is registered.
    pub fn contains(&self, stream_id: u32) -> bool {
        self.streams.contains_key(&stream_id)
    }

    /// Registered stream ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.streams.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered streams.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
