// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Element types a stream can declare.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Element type of every value in a stream.
///
/// The discriminants are the on-disk type codes written by the optimized
/// sample layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ElementType {
    /// 32-bit IEEE-754 float
    #[serde(rename = "float32")]
    Float32 = 1,
    /// 64-bit IEEE-754 float
    #[serde(rename = "double64")]
    Double64 = 2,
    /// UTF-8 text of arbitrary length
    #[serde(rename = "string")]
    String = 3,
    /// 32-bit signed integer
    #[serde(rename = "int32")]
    Int32 = 4,
    /// 16-bit signed integer
    #[serde(rename = "int16")]
    Int16 = 5,
    /// 8-bit signed integer
    #[serde(rename = "int8")]
    Int8 = 6,
    /// 64-bit signed integer
    #[serde(rename = "int64")]
    Int64 = 7,
}

impl ElementType {
    /// All element types in type-code order.
    pub const ALL: [ElementType; 7] = [
        ElementType::Float32,
        ElementType::Double64,
        ElementType::String,
        ElementType::Int32,
        ElementType::Int16,
        ElementType::Int8,
        ElementType::Int64,
    ];

    /// On-disk type code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up an element type by its on-disk code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Size in bytes of one value, if fixed.
    pub const fn size(self) -> Option<usize> {
        match self {
            ElementType::Int8 => Some(1),
            ElementType::Int16 => Some(2),
            ElementType::Int32 | ElementType::Float32 => Some(4),
            ElementType::Int64 | ElementType::Double64 => Some(8),
            ElementType::String => None,
        }
    }

    /// Channel format name as it appears in stream header XML.
    pub const fn as_str(self) -> &'static str {
        match self {
            ElementType::Float32 => "float32",
            ElementType::Double64 => "double64",
            ElementType::String => "string",
            ElementType::Int32 => "int32",
            ElementType::Int16 => "int16",
            ElementType::Int8 => "int8",
            ElementType::Int64 => "int64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an `ElementType` from string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseElementTypeError {
    name: String,
}

impl fmt::Display for ParseElementTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown channel format '{}'", self.name)
    }
}

impl std::error::Error for ParseElementTypeError {}

impl FromStr for ElementType {
    type Err = ParseElementTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "float32" | "float" => Ok(ElementType::Float32),
            "double64" | "double" | "float64" => Ok(ElementType::Double64),
            "string" => Ok(ElementType::String),
            "int32" => Ok(ElementType::Int32),
            "int16" => Ok(ElementType::Int16),
            "int8" => Ok(ElementType::Int8),
            "int64" => Ok(ElementType::Int64),
            _ => Err(ParseElementTypeError { name: s.to_string() }),
        }
    }
}
