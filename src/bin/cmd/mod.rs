// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod bench;
mod check;
mod demo;

pub use bench::BenchCmd;
pub use check::CheckCmd;
pub use demo::DemoCmd;
