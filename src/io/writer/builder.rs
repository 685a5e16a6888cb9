// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating XDF writers.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{FormatVersion, Result, XdfError};
use crate::io::formats::xdf::XdfWriter;

/// Default output buffer size, in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Configuration for creating a writer.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// path = "session.xdf"
/// version = "1.1"
/// flush_each_chunk = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Path to the output file
    pub path: PathBuf,
    /// Format version, which selects the sample layout
    pub version: FormatVersion,
    /// Size of the output buffer in bytes
    pub buffer_capacity: usize,
    /// Flush after every chunk
    pub flush_each_chunk: bool,
    /// Flush after every boundary chunk
    pub flush_on_boundary: bool,
    /// Record the creation time in the file header
    pub include_datetime: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            version: FormatVersion::default(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            flush_each_chunk: false,
            flush_on_boundary: true,
            include_datetime: true,
        }
    }
}

impl WriterConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| XdfError::config(format!("invalid writer config: {e}")))
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| XdfError::io(format!("reading config {}", path.display()), e))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(XdfError::config("output path is not set"));
        }
        if self.buffer_capacity == 0 {
            return Err(XdfError::config("buffer_capacity must be greater than 0"));
        }
        Ok(())
    }
}

/// Builder for creating XDF file writers.
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    config: WriterConfig,
}

impl WriterBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Set the path to the output file.
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.path = path.as_ref().to_path_buf();
        self
    }

    /// Set the format version.
    pub fn version(mut self, version: FormatVersion) -> Self {
        self.config.version = version;
        self
    }

    /// Set the output buffer size in bytes.
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.config.buffer_capacity = bytes;
        self
    }

    /// Flush after every chunk.
    pub fn flush_each_chunk(mut self, enabled: bool) -> Self {
        self.config.flush_each_chunk = enabled;
        self
    }

    /// Flush after every boundary chunk.
    pub fn flush_on_boundary(mut self, enabled: bool) -> Self {
        self.config.flush_on_boundary = enabled;
        self
    }

    /// Record the creation time in the file header.
    pub fn include_datetime(mut self, enabled: bool) -> Self {
        self.config.include_datetime = enabled;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Create (or truncate) the file and write its header.
    pub fn build(self) -> Result<XdfWriter<BufWriter<File>>> {
        self.config.validate()?;
        XdfWriter::with_config(&self.config)
    }

    /// Open an existing XDF file for append.
    pub fn build_append(self) -> Result<XdfWriter<BufWriter<File>>> {
        self.config.validate()?;
        XdfWriter::append_with_config(&self.config)
    }
}
