// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # xdfcodec CLI
//!
//! Command-line tool for writing and checking XDF recordings.
//!
//! ## Usage
//!
//! ```sh
//! # Write the demonstration recording
//! xdfcodec demo out.xdf --version 1.1
//!
//! # Benchmark concurrent writing
//! xdfcodec bench bench.xdf --streams 8 --blocks 1000
//!
//! # Check a file's magic
//! xdfcodec check recording.xdf
//! ```
//!
//! Log output goes to stderr and is controlled with `RUST_LOG`.

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{BenchCmd, CheckCmd, DemoCmd};
use common::Result;
use tracing_subscriber::EnvFilter;
use xdfcodec::{WriterConfig, XdfError};

/// xdfcodec - XDF recording toolkit
///
/// Write and check Extensible Data Format files.
#[derive(Parser, Clone)]
#[command(name = "xdfcodec")]
#[command(about = "Writer toolkit for XDF (Extensible Data Format) recordings", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Writer configuration file (TOML)
    #[arg(long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Write a small demonstration recording
    Demo(DemoCmd),

    /// Write a synthetic multi-stream recording concurrently and time it
    Bench(BenchCmd),

    /// Check whether a file is XDF
    Check(CheckCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => WriterConfig::from_file(path)?,
        None => WriterConfig::default(),
    };

    match cli.command {
        Commands::Demo(cmd) => cmd.run(config),
        Commands::Bench(cmd) => cmd.run(config),
        Commands::Check(cmd) => cmd.run(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        if let Some(err) = e.downcast_ref::<XdfError>() {
            tracing::debug!(
                validation = err.is_validation(),
                fields = ?err.log_fields(),
                "command failed"
            );
        }
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
