// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout xdfcodec.
//!
//! This module provides the foundational types for the library:
//! - [`XdfError`] - Error taxonomy shared by every operation
//! - [`ElementType`] - Declared element type of a stream
//! - [`StreamRegistry`] - Declared stream shapes, keyed by stream id
//! - [`FormatVersion`] - File format version, which fixes the sample layout

pub mod error;
pub mod registry;
pub mod value;

pub use error::{Result, XdfError};
pub use registry::{StreamInfo, StreamRegistry};
pub use value::{ElementType, ParseElementTypeError};

use serde::{Deserialize, Serialize};

/// File format version written into the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FormatVersion {
    /// XDF 1.0, per-sample framed sample chunks
    #[default]
    #[serde(rename = "1.0")]
    V1_0,
    /// XDF 1.1, columnar sample chunks
    #[serde(rename = "1.1")]
    V1_1,
}

/// On-disk layout of sample chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleLayout {
    /// Tag 3: count field, then per row a timestamp marker and values
    Legacy,
    /// Tag 7: fixed header, all timestamps, then all values
    Optimized,
}

impl FormatVersion {
    /// Sample layout used by writers of this version.
    pub fn sample_layout(&self) -> SampleLayout {
        match self {
            FormatVersion::V1_0 => SampleLayout::Legacy,
            FormatVersion::V1_1 => SampleLayout::Optimized,
        }
    }

    /// Version text as written in the file header.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatVersion::V1_0 => "1.0",
            FormatVersion::V1_1 => "1.1",
        }
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a `FormatVersion` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseVersionError {
    _private: (),
}

impl std::fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid format version, expected '1.0' or '1.1'")
    }
}

impl std::error::Error for ParseVersionError {}

impl std::str::FromStr for FormatVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "1.0" | "1" | "v10" => Ok(FormatVersion::V1_0),
            "1.1" | "v11" => Ok(FormatVersion::V1_1),
            _ => Err(ParseVersionError { _private: () }),
        }
    }
}
