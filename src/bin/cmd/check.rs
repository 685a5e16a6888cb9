// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Check command - verify a file's XDF magic.

use std::path::PathBuf;

use clap::Args;
use xdfcodec::io::check_magic;

use crate::common::Result;

/// Check whether a file is XDF. Exits with status 1 if it is not.
#[derive(Args, Clone, Debug)]
pub struct CheckCmd {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

impl CheckCmd {
    pub fn run(self) -> Result<()> {
        check_magic(&self.input)?;
        println!("{}: XDF file", self.input.display());
        Ok(())
    }
}
