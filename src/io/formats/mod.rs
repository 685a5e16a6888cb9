// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File format implementations.
//!
//! - [`xdf`]: XDF 1.0 and 1.1 writer

pub mod xdf;
