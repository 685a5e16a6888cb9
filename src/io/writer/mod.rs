// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Writer construction.
//!
//! [`WriterConfig`] holds every option a file writer takes and can be loaded
//! from TOML; [`WriterBuilder`] is the fluent front end.
//!
//! ```rust,no_run
//! use xdfcodec::io::writer::WriterBuilder;
//! use xdfcodec::FormatVersion;
//!
//! let writer = WriterBuilder::new()
//!     .path("session.xdf")
//!     .version(FormatVersion::V1_1)
//!     .flush_each_chunk(true)
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;

pub use builder::{WriterBuilder, WriterConfig, DEFAULT_BUFFER_CAPACITY};
