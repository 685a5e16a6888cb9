// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bench command - concurrent multi-stream write throughput.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use xdfcodec::{
    ElementType, FormatVersion, SampleLayout, StreamFooter, TimestampElider, WriterConfig,
    WriterStats, XdfRecorder,
};

use crate::common::{format_duration, writer_builder, ProgressBar, Result};

/// Nominal rate of the synthetic streams. A power of two keeps the
/// generated timestamps exact, so every regular sample is elided.
const SAMPLE_RATE: f64 = 256.0;
const START_TIME: f64 = 1000.0;

/// Write a synthetic recording, one writer thread per stream.
#[derive(Args, Clone, Debug)]
pub struct BenchCmd {
    /// Output file
    #[arg(value_name = "OUT")]
    output: PathBuf,

    /// Number of streams
    #[arg(long, default_value_t = 4)]
    streams: u32,

    /// Sample blocks per stream
    #[arg(long, default_value_t = 100)]
    blocks: u64,

    /// Samples per block
    #[arg(long, default_value_t = 32)]
    samples: usize,

    /// Channels per stream
    #[arg(long, default_value_t = 8)]
    channels: u32,

    /// Format version ("1.0" or "1.1"), overrides the config file
    #[arg(long, value_name = "VERSION")]
    version: Option<FormatVersion>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct BenchReport {
    path: String,
    version: FormatVersion,
    streams: u32,
    samples_per_stream: u64,
    elapsed_ms: u128,
    #[serde(flatten)]
    stats: WriterStats,
}

fn stream_header(stream_id: u32, channels: u32) -> String {
    format!(
        "<?xml version=\"1.0\"?><info><name>bench{stream_id}</name><type>EEG</type>\
         <channel_count>{channels}</channel_count><nominal_srate>{SAMPLE_RATE}</nominal_srate>\
         <channel_format>float32</channel_format><desc/></info>"
    )
}

impl BenchCmd {
    pub fn run(self, config: WriterConfig) -> Result<()> {
        if self.channels == 0 || self.samples == 0 {
            anyhow::bail!("--channels and --samples must be at least 1");
        }

        let started = Instant::now();
        let mut writer = writer_builder(config, &self.output, self.version).build()?;
        for stream_id in 0..self.streams {
            writer.register_stream(
                stream_id,
                &stream_header(stream_id, self.channels),
                self.channels,
                ElementType::Float32,
                format!("bench{stream_id}"),
            )?;
        }

        let recorder = Arc::new(writer.start_recording());
        let progress = ProgressBar::new(u64::from(self.streams) * self.blocks, "bench");

        (0..self.streams)
            .into_par_iter()
            .try_for_each(|stream_id| self.record_stream(&recorder, stream_id, &progress))?;
        recorder.write_boundary()?;

        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| anyhow::anyhow!("recorder is still shared after all streams finished"))?;
        let version = recorder.version();
        let stats = recorder.stats();
        recorder.finish()?;

        let elapsed = started.elapsed();
        progress.finish_with_message(format!(
            "done in {}",
            format_duration(elapsed.as_nanos() as u64)
        ));

        let report = BenchReport {
            path: self.output.display().to_string(),
            version,
            streams: self.streams,
            samples_per_stream: self.blocks * self.samples as u64,
            elapsed_ms: elapsed.as_millis(),
            stats,
        };
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "Wrote {} (XDF {}): {} streams x {} samples, {} chunks, {} in {}",
                report.path,
                report.version,
                report.streams,
                report.samples_per_stream,
                stats.chunks_written,
                indicatif::HumanBytes(stats.bytes_written),
                format_duration(elapsed.as_nanos() as u64)
            );
        }
        Ok(())
    }

    fn record_stream(
        &self,
        recorder: &XdfRecorder,
        stream_id: u32,
        progress: &ProgressBar,
    ) -> Result<()> {
        let channels = self.channels as usize;
        // Only the legacy layout can omit a row's timestamp.
        let mut elider = (recorder.version().sample_layout() == SampleLayout::Legacy)
            .then(|| TimestampElider::new(SAMPLE_RATE));
        let mut footer = StreamFooter::new();
        let mut timestamps = vec![0.0; self.samples];
        let mut values = vec![0.0f32; self.samples * channels];

        for block in 0..self.blocks {
            let first = block * self.samples as u64;
            for (i, ts) in timestamps.iter_mut().enumerate() {
                *ts = START_TIME + (first + i as u64) as f64 / SAMPLE_RATE;
            }
            for (i, v) in values.iter_mut().enumerate() {
                *v = ((first as usize * channels + i) % 1000) as f32 * 0.5 + stream_id as f32;
            }

            footer.observe(&timestamps);
            if let Some(elider) = elider.as_mut() {
                elider.elide(&mut timestamps);
            }
            recorder.write_samples(stream_id, &timestamps, &values)?;
            progress.inc(1);
        }

        let last = START_TIME + (self.blocks * self.samples as u64) as f64 / SAMPLE_RATE;
        recorder.write_clock_offset(stream_id, last, 0.0)?;
        footer.add_clock_offset(last, 0.0);
        recorder.write_stream_footer(stream_id, &footer.to_xml())?;
        Ok(())
    }
}
