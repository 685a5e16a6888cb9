// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XDF file writer.
//!
//! Writing happens in two phases:
//!
//! 1. [`XdfWriter`] (registering): single owner, streams are declared with
//!    [`XdfWriter::register_stream`]. Chunks of any kind may already be
//!    written.
//! 2. [`XdfRecorder`] (recording): obtained with
//!    [`XdfWriter::start_recording`]. The stream set is frozen, every write
//!    takes `&self` and the recorder can be shared between threads through an
//!    `Arc`, typically one thread per live stream.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use xdfcodec::{ElementType, FormatVersion, XdfWriter};
//!
//! let mut writer = XdfWriter::create("session.xdf", FormatVersion::V1_0)?;
//! writer.register_stream(100, "<info><name>EEG</name></info>", 3, ElementType::Int16, "EEG")?;
//!
//! let recorder = Arc::new(writer.start_recording());
//! recorder.write_samples(100, &[5.1, 5.2], &[1i16, 2, 3, 4, 5, 6])?;
//! recorder.write_boundary()?;
//! recorder.write_clock_offset(100, 5.3, -0.01)?;
//! recorder.write_stream_footer(100, "<info><sample_count>2</sample_count></info>")?;
//! # Ok(())
//! # }
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::codec::{put_f64, SampleValue};
use super::constants::{ChunkTag, BOUNDARY_UUID, CLOCK_OFFSET_LEN, XDF_MAGIC};
use super::framer::{ChunkFramer, WriterStats};
use super::samples::SampleEncoder;
use crate::core::{ElementType, FormatVersion, Result, StreamInfo, StreamRegistry, XdfError};
use crate::io::detection::check_magic;
use crate::io::writer::{WriterBuilder, WriterConfig};

/// Render the file header XML.
fn file_header_xml(version: FormatVersion, include_datetime: bool) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\"?><info><version>{}</version>",
        version.as_str()
    );
    if include_datetime {
        xml.push_str("<datetime>");
        xml.push_str(&chrono::Utc::now().to_rfc3339());
        xml.push_str("</datetime>");
    }
    xml.push_str("</info>");
    xml
}

/// Recording-phase writer, shareable between threads.
///
/// Every operation validates its arguments against the frozen stream set
/// and builds the complete chunk payload before taking the output lock.
pub struct XdfRecorder<W: Write = BufWriter<File>> {
    framer: ChunkFramer<W>,
    encoder: SampleEncoder,
    registry: StreamRegistry,
    version: FormatVersion,
    flush_on_boundary: bool,
    path: Option<PathBuf>,
}

impl<W: Write> XdfRecorder<W> {
    /// Write a sample block given as one flat row-major slice.
    ///
    /// `values.len()` must equal `timestamps.len() * channel_count`. A
    /// timestamp of `0.0` marks a deduced timestamp (legacy layout only
    /// omits it; the optimized layout stores it as-is). Empty blocks write
    /// nothing.
    pub fn write_samples<T: SampleValue>(
        &self,
        stream_id: u32,
        timestamps: &[f64],
        values: &[T],
    ) -> Result<()> {
        let stream = self.registry.lookup(stream_id)?;
        if let Some(block) = self.encoder.encode(stream, timestamps, values)? {
            self.framer.emit(block.tag, Some(stream_id), &block.payload)?;
            tracing::trace!(
                stream_id,
                rows = block.rows,
                bytes = block.payload.len(),
                "samples written"
            );
        }
        Ok(())
    }

    /// Write a sample block given as one buffer per row.
    ///
    /// Every row must hold exactly `channel_count` values and there must be
    /// one timestamp per row.
    pub fn write_rows<T: SampleValue, R: AsRef<[T]>>(
        &self,
        stream_id: u32,
        timestamps: &[f64],
        rows: &[R],
    ) -> Result<()> {
        let stream = self.registry.lookup(stream_id)?;
        if let Some(block) = self.encoder.encode_rows(stream, timestamps, rows)? {
            self.framer.emit(block.tag, Some(stream_id), &block.payload)?;
            tracing::trace!(
                stream_id,
                rows = block.rows,
                bytes = block.payload.len(),
                "samples written"
            );
        }
        Ok(())
    }

    /// Record the clock offset between a stream's source and the recorder.
    pub fn write_clock_offset(
        &self,
        stream_id: u32,
        collection_time: f64,
        offset: f64,
    ) -> Result<()> {
        self.registry.lookup(stream_id)?;
        let mut payload = Vec::with_capacity(CLOCK_OFFSET_LEN);
        put_f64(&mut payload, collection_time);
        put_f64(&mut payload, offset);
        self.framer.emit(ChunkTag::ClockOffset, Some(stream_id), &payload)?;
        Ok(())
    }

    /// Write a boundary chunk, a resynchronization point for readers
    /// recovering from a damaged file.
    pub fn write_boundary(&self) -> Result<()> {
        self.framer.emit(ChunkTag::Boundary, None, BOUNDARY_UUID.as_bytes())?;
        if self.flush_on_boundary {
            self.framer.flush()?;
        }
        Ok(())
    }

    /// Write a stream's closing summary. Call once, after its last samples.
    pub fn write_stream_footer(&self, stream_id: u32, footer_xml: &str) -> Result<()> {
        self.registry.lookup(stream_id)?;
        self.framer.emit(ChunkTag::StreamFooter, Some(stream_id), footer_xml.as_bytes())?;
        Ok(())
    }

    /// Look up a registered stream.
    pub fn stream(&self, stream_id: u32) -> Result<&StreamInfo> {
        self.registry.lookup(stream_id)
    }

    /// Registered streams.
    pub fn streams(&self) -> &StreamRegistry {
        &self.registry
    }

    /// Format version fixed at construction.
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Output path, if the writer was opened on a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Chunk and byte counters.
    pub fn stats(&self) -> WriterStats {
        self.framer.stats()
    }

    /// Absolute file offset the next chunk will start at.
    pub fn position(&self) -> Result<u64> {
        self.framer.position()
    }

    /// Flush buffered bytes to the sink.
    pub fn flush(&self) -> Result<()> {
        self.framer.flush()
    }

    /// Return to the registering phase, e.g. to add a stream that appeared
    /// late. Requires sole ownership, so no other thread can be writing.
    pub fn into_registering(self) -> XdfWriter<W> {
        tracing::debug!(streams = self.registry.len(), "recording paused for registration");
        XdfWriter { inner: self }
    }

    /// Flush and return the sink.
    pub fn finish(self) -> Result<W> {
        let stats = self.framer.stats();
        let sink = self.framer.into_inner()?;
        tracing::debug!(
            chunks = stats.chunks_written,
            bytes = stats.bytes_written,
            streams = self.registry.len(),
            "XDF writer finished"
        );
        Ok(sink)
    }
}

/// Registering-phase XDF writer.
pub struct XdfWriter<W: Write = BufWriter<File>> {
    inner: XdfRecorder<W>,
}

impl XdfWriter<BufWriter<File>> {
    /// Create or truncate `path` and write the magic and file header.
    pub fn create<P: AsRef<Path>>(path: P, version: FormatVersion) -> Result<Self> {
        WriterBuilder::new().path(path).version(version).build()
    }

    /// Open an existing XDF file and append chunks after its current end.
    ///
    /// No new file header is written. Stream ids registered by an earlier
    /// session are unknown to this writer and must not be reused.
    pub fn append<P: AsRef<Path>>(path: P, version: FormatVersion) -> Result<Self> {
        WriterBuilder::new().path(path).version(version).build_append()
    }

    /// Create a file writer from a full configuration.
    pub fn with_config(config: &WriterConfig) -> Result<Self> {
        let path = config.path.as_path();
        let file = File::create(path)
            .map_err(|e| XdfError::io(format!("creating {}", path.display()), e))?;
        let sink = BufWriter::with_capacity(config.buffer_capacity, file);

        let mut writer = Self::from_sink(sink, config)?;
        writer.inner.path = Some(config.path.clone());
        tracing::debug!(
            path = %path.display(),
            version = %config.version,
            layout = ?writer.inner.encoder.layout(),
            "XDF file created"
        );
        Ok(writer)
    }

    /// Append to an existing file using a full configuration.
    pub fn append_with_config(config: &WriterConfig) -> Result<Self> {
        let path = config.path.as_path();
        check_magic(path)?;
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| XdfError::io(format!("opening {} for append", path.display()), e))?;
        let start = file
            .metadata()
            .map_err(|e| XdfError::io(format!("reading metadata of {}", path.display()), e))?
            .len();
        let sink = BufWriter::with_capacity(config.buffer_capacity, file);

        let mut writer = Self::assemble(sink, config, start);
        writer.inner.path = Some(config.path.clone());
        tracing::debug!(path = %path.display(), offset = start, "XDF file opened for append");
        Ok(writer)
    }
}

impl<W: Write> XdfWriter<W> {
    /// Start a new XDF file on an arbitrary sink with default options.
    pub fn new(sink: W, version: FormatVersion) -> Result<Self> {
        let config = WriterConfig {
            version,
            ..WriterConfig::default()
        };
        Self::from_sink(sink, &config)
    }

    /// Start a new XDF file on an arbitrary sink. `config.path` is ignored.
    pub fn from_sink(sink: W, config: &WriterConfig) -> Result<Self> {
        let writer = Self::assemble(sink, config, 0);
        writer.inner.framer.write_raw(&XDF_MAGIC)?;
        let header = file_header_xml(config.version, config.include_datetime);
        writer.inner.framer.emit(ChunkTag::FileHeader, None, header.as_bytes())?;
        Ok(writer)
    }

    fn assemble(sink: W, config: &WriterConfig, start_position: u64) -> Self {
        Self {
            inner: XdfRecorder {
                framer: ChunkFramer::new(sink, start_position, config.flush_each_chunk),
                encoder: SampleEncoder::new(config.version.sample_layout()),
                registry: StreamRegistry::new(),
                version: config.version,
                flush_on_boundary: config.flush_on_boundary,
                path: None,
            },
        }
    }

    /// Declare a stream and write its header chunk.
    ///
    /// `header_xml` is the stream's metadata document, stored verbatim.
    /// Fails if `stream_id` is already registered or `channel_count` is 0.
    pub fn register_stream(
        &mut self,
        stream_id: u32,
        header_xml: &str,
        channel_count: u32,
        element_type: ElementType,
        name: impl Into<String>,
    ) -> Result<()> {
        if self.inner.registry.contains(stream_id) {
            return Err(XdfError::duplicate_stream(stream_id));
        }
        if channel_count == 0 {
            return Err(XdfError::shape_mismatch(
                stream_id,
                "channel count must be at least 1",
            ));
        }

        self.inner.framer.emit(ChunkTag::StreamHeader, Some(stream_id), header_xml.as_bytes())?;

        let info = self.inner.registry.register(StreamInfo {
            stream_id,
            element_type,
            channel_count,
            name: name.into(),
            header: header_xml.to_string(),
        })?;
        tracing::debug!(
            stream_id,
            name = %info.name,
            channels = channel_count,
            element_type = %element_type,
            "stream registered"
        );
        Ok(())
    }

    /// Freeze the stream set and enter the recording phase.
    pub fn start_recording(self) -> XdfRecorder<W> {
        tracing::debug!(streams = self.inner.registry.len(), "recording started");
        self.inner
    }

    /// See [`XdfRecorder::write_samples`].
    pub fn write_samples<T: SampleValue>(
        &self,
        stream_id: u32,
        timestamps: &[f64],
        values: &[T],
    ) -> Result<()> {
        self.inner.write_samples(stream_id, timestamps, values)
    }

    /// See [`XdfRecorder::write_rows`].
    pub fn write_rows<T: SampleValue, R: AsRef<[T]>>(
        &self,
        stream_id: u32,
        timestamps: &[f64],
        rows: &[R],
    ) -> Result<()> {
        self.inner.write_rows(stream_id, timestamps, rows)
    }

    /// See [`XdfRecorder::write_clock_offset`].
    pub fn write_clock_offset(
        &self,
        stream_id: u32,
        collection_time: f64,
        offset: f64,
    ) -> Result<()> {
        self.inner
            .write_clock_offset(stream_id, collection_time, offset)
    }

    /// See [`XdfRecorder::write_boundary`].
    pub fn write_boundary(&self) -> Result<()> {
        self.inner.write_boundary()
    }

    /// See [`XdfRecorder::write_stream_footer`].
    pub fn write_stream_footer(&self, stream_id: u32, footer_xml: &str) -> Result<()> {
        self.inner.write_stream_footer(stream_id, footer_xml)
    }

    /// Registered streams.
    pub fn streams(&self) -> &StreamRegistry {
        self.inner.streams()
    }

    /// Format version fixed at construction.
    pub fn version(&self) -> FormatVersion {
        self.inner.version()
    }

    /// Output path, if the writer was opened on a file.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path()
    }

    /// Chunk and byte counters.
    pub fn stats(&self) -> WriterStats {
        self.inner.stats()
    }

    /// Absolute file offset the next chunk will start at.
    pub fn position(&self) -> Result<u64> {
        self.inner.position()
    }

    /// Flush buffered bytes to the sink.
    pub fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    /// Flush and return the sink.
    pub fn finish(self) -> Result<W> {
        self.inner.finish()
    }
}
