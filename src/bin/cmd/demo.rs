// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Demo command - write a small recording exercising every chunk type.

use std::path::PathBuf;

use clap::Args;
use xdfcodec::{ElementType, FormatVersion, StreamFooter, WriterConfig};

use crate::common::{writer_builder, Result};

/// EEG-like int16 stream id.
const EEG_STREAM: u32 = 0;
/// String marker stream id.
const MARKER_STREAM: u32 = 0x02C0_FFEE;

/// Write the demonstration recording.
#[derive(Args, Clone, Debug)]
pub struct DemoCmd {
    /// Output file
    #[arg(value_name = "OUT")]
    output: PathBuf,

    /// Format version ("1.0" or "1.1"), overrides the config file
    #[arg(long, value_name = "VERSION")]
    version: Option<FormatVersion>,
}

fn stream_header(name: &str, kind: &str, channels: u32, format: ElementType) -> String {
    format!(
        "<?xml version=\"1.0\"?><info><name>{name}</name><type>{kind}</type>\
         <channel_count>{channels}</channel_count><nominal_srate>10</nominal_srate>\
         <channel_format>{format}</channel_format><desc/></info>"
    )
}

impl DemoCmd {
    pub fn run(self, config: WriterConfig) -> Result<()> {
        let mut writer = writer_builder(config, &self.output, self.version).build()?;

        writer.register_stream(
            EEG_STREAM,
            &stream_header("SendDataC", "EEG", 3, ElementType::Int16),
            3,
            ElementType::Int16,
            "SendDataC",
        )?;
        writer.register_stream(
            MARKER_STREAM,
            &stream_header("SendDataString", "StringMarker", 1, ElementType::String),
            1,
            ElementType::String,
            "SendDataString",
        )?;
        let recorder = writer.start_recording();
        recorder.write_boundary()?;

        let mut eeg_footer = StreamFooter::new();
        let mut marker_footer = StreamFooter::new();

        // One sample each; the marker is long enough to need a 4-byte length.
        let long_marker = format!("<marker>{}</marker>", "x".repeat(200));
        recorder.write_samples(EEG_STREAM, &[5.1], &[0xC0i16, 0xFF, 0xEE])?;
        recorder.write_samples(MARKER_STREAM, &[5.1], &[long_marker.as_str()])?;
        eeg_footer.observe(&[5.1]);
        marker_footer.observe(&[5.1]);

        // Several samples, some with deduced timestamps.
        let ts = [5.2, 0.0, 0.0, 5.5];
        let data: [i16; 12] = [12, 22, 32, 13, 23, 33, 14, 24, 34, 15, 25, 35];
        recorder.write_samples(EEG_STREAM, &ts, &data)?;
        recorder.write_samples(MARKER_STREAM, &ts, &["Hello", "World", "from", "LSL"])?;
        eeg_footer.observe(&ts);
        marker_footer.observe(&ts);

        // The same data given as one buffer per row.
        let ts = [5.6, 0.0, 0.0, 0.0];
        let rows: Vec<&[i16]> = data.chunks(3).collect();
        let marker_rows = [["Hello"], ["World"], ["from"], ["LSL"]];
        recorder.write_rows::<i16, _>(EEG_STREAM, &ts, &rows)?;
        recorder.write_rows::<&str, _>(MARKER_STREAM, &ts, &marker_rows)?;
        eeg_footer.observe(&ts);
        marker_footer.observe(&ts);

        recorder.write_boundary()?;
        for (collection_time, offset) in [(6.0, -0.1), (7.0, -0.1)] {
            recorder.write_clock_offset(EEG_STREAM, collection_time, offset)?;
            eeg_footer.add_clock_offset(collection_time, offset);
        }

        recorder.write_stream_footer(EEG_STREAM, &eeg_footer.to_xml())?;
        recorder.write_stream_footer(MARKER_STREAM, &marker_footer.to_xml())?;

        let version = recorder.version();
        let stats = recorder.stats();
        recorder.finish()?;

        println!(
            "Wrote {} (XDF {}): {} chunks, {}",
            self.output.display(),
            version,
            stats.chunks_written,
            indicatif::HumanBytes(stats.bytes_written)
        );
        Ok(())
    }
}
