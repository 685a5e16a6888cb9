// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for xdfcodec.
//!
//! Every failure the writer can report is one of these variants. Validation
//! errors (`UnknownStream`, `ShapeMismatch`, `TypeMismatch`, `CountOverflow`)
//! are raised before any byte of the offending chunk reaches the output, so a
//! failed call never leaves a malformed chunk behind.

use thiserror::Error;

use super::value::ElementType;

/// Errors that can occur while writing an XDF file.
#[derive(Debug, Error)]
pub enum XdfError {
    /// Filesystem or sink failure while opening or writing
    #[error("I/O error during {context}: {source}")]
    Io {
        /// What the writer was doing
        context: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// An operation referenced a stream id that was never registered
    #[error("Unknown stream id {stream_id}")]
    UnknownStream {
        /// Offending stream id
        stream_id: u32,
    },

    /// A stream id was registered twice
    #[error("Stream id {stream_id} is already registered")]
    DuplicateStream {
        /// Offending stream id
        stream_id: u32,
    },

    /// Timestamps, rows and channel count disagree
    #[error("Shape mismatch for stream {stream_id}: {reason}")]
    ShapeMismatch {
        /// Stream being written
        stream_id: u32,
        /// What disagreed
        reason: String,
    },

    /// Sample values do not match the stream's declared element type
    #[error("Type mismatch for stream {stream_id}: declared {declared}, got {actual}")]
    TypeMismatch {
        /// Stream being written
        stream_id: u32,
        /// Type the stream was registered with
        declared: ElementType,
        /// Type of the values passed in
        actual: ElementType,
    },

    /// A block holds more rows than its count field can represent
    #[error("Sample block of {count} rows exceeds the maximum of {max} per chunk")]
    CountOverflow {
        /// Rows in the block
        count: usize,
        /// Largest representable row count
        max: u64,
    },

    /// A file opened for append does not start with the XDF magic
    #[error("Not an XDF file: {path}")]
    BadMagic {
        /// Path that was checked
        path: String,
    },

    /// The output lock was poisoned by a panicking writer thread
    #[error("Output lock poisoned: {0}")]
    LockPoisoned(String),

    /// Invalid writer configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl XdfError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        XdfError::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an "unknown stream" error.
    pub fn unknown_stream(stream_id: u32) -> Self {
        XdfError::UnknownStream { stream_id }
    }

    /// Create a "duplicate stream" error.
    pub fn duplicate_stream(stream_id: u32) -> Self {
        XdfError::DuplicateStream { stream_id }
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(stream_id: u32, reason: impl Into<String>) -> Self {
        XdfError::ShapeMismatch {
            stream_id,
            reason: reason.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(stream_id: u32, declared: ElementType, actual: ElementType) -> Self {
        XdfError::TypeMismatch {
            stream_id,
            declared,
            actual,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        XdfError::Config(message.into())
    }

    /// Whether the error was caused by the caller's arguments rather than the sink.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            XdfError::UnknownStream { .. }
                | XdfError::DuplicateStream { .. }
                | XdfError::ShapeMismatch { .. }
                | XdfError::TypeMismatch { .. }
                | XdfError::CountOverflow { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            XdfError::Io { context, source } => {
                vec![("context", context.clone()), ("cause", source.to_string())]
            }
            XdfError::UnknownStream { stream_id } | XdfError::DuplicateStream { stream_id } => {
                vec![("stream_id", stream_id.to_string())]
            }
            XdfError::ShapeMismatch { stream_id, reason } => {
                vec![("stream_id", stream_id.to_string()), ("reason", reason.clone())]
            }
            XdfError::TypeMismatch {
                stream_id,
                declared,
                actual,
            } => vec![
                ("stream_id", stream_id.to_string()),
                ("declared", declared.to_string()),
                ("actual", actual.to_string()),
            ],
            XdfError::CountOverflow { count, max } => {
                vec![("count", count.to_string()), ("max", max.to_string())]
            }
            XdfError::BadMagic { path } => vec![("path", path.clone())],
            XdfError::LockPoisoned(msg) | XdfError::Config(msg) => {
                vec![("message", msg.clone())]
            }
        }
    }
}

impl From<std::io::Error> for XdfError {
    fn from(err: std::io::Error) -> Self {
        XdfError::io("write", err)
    }
}

/// Result type for xdfcodec operations.
pub type Result<T> = std::result::Result<T, XdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_stream_error() {
        let err = XdfError::unknown_stream(999);
        assert!(matches!(err, XdfError::UnknownStream { stream_id: 999 }));
        assert_eq!(err.to_string(), "Unknown stream id 999");
        assert!(err.is_validation());
    }

    #[test]
    fn test_duplicate_stream_error() {
        let err = XdfError::duplicate_stream(7);
        assert_eq!(err.to_string(), "Stream id 7 is already registered");
    }

    #[test]
    fn test_shape_mismatch_error() {
        let err = XdfError::shape_mismatch(1, "5 timestamps for 4 rows");
        assert_eq!(
            err.to_string(),
            "Shape mismatch for stream 1: 5 timestamps for 4 rows"
        );
    }

    #[test]
    fn test_type_mismatch_error() {
        let err = XdfError::type_mismatch(3, ElementType::Double64, ElementType::Int16);
        assert_eq!(
            err.to_string(),
            "Type mismatch for stream 3: declared double64, got int16"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: XdfError = io_err.into();
        assert!(matches!(err, XdfError::Io { .. }));
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "I/O error during write: denied");
    }

    #[test]
    fn test_log_fields_type_mismatch() {
        let err = XdfError::type_mismatch(3, ElementType::Float32, ElementType::String);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("stream_id", "3".to_string()));
        assert_eq!(fields[1], ("declared", "float32".to_string()));
        assert_eq!(fields[2], ("actual", "string".to_string()));
    }

    #[test]
    fn test_log_fields_count_overflow() {
        let err = XdfError::CountOverflow {
            count: 10,
            max: 4,
        };
        let fields = err.log_fields();
        assert_eq!(fields[0], ("count", "10".to_string()));
        assert_eq!(fields[1], ("max", "4".to_string()));
    }
}
