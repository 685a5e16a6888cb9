// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer: format detection, the XDF format and writer construction.

pub mod detection;
pub mod formats;
pub mod writer;

pub use detection::{check_magic, is_xdf_file};
pub use writer::{WriterBuilder, WriterConfig};
