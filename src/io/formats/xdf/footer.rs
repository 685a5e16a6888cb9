// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Stream footer summaries.
//!
//! Accumulates what a stream footer reports (time range, sample count and
//! clock offset history) while a stream is being recorded, then renders the
//! footer XML passed to `write_stream_footer`.

use std::fmt::Write as _;

use super::constants::DEDUCED_TIMESTAMP;

/// One clock offset measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockOffset {
    /// Recorder time at which the offset was measured
    pub collection_time: f64,
    /// Source clock minus recorder clock, in seconds
    pub offset: f64,
}

/// Running summary of one stream.
#[derive(Debug, Clone, Default)]
pub struct StreamFooter {
    first_timestamp: Option<f64>,
    last_timestamp: Option<f64>,
    sample_count: u64,
    clock_offsets: Vec<ClockOffset>,
}

impl StreamFooter {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one written block.
    pub fn observe(&mut self, timestamps: &[f64]) {
        self.sample_count += timestamps.len() as u64;
        let mut explicit = timestamps.iter().filter(|&&t| t != DEDUCED_TIMESTAMP);
        if let Some(&first) = explicit.next() {
            self.first_timestamp.get_or_insert(first);
            self.last_timestamp = Some(explicit.last().copied().unwrap_or(first));
        }
    }

    /// Record a clock offset measurement.
    pub fn add_clock_offset(&mut self, collection_time: f64, offset: f64) {
        self.clock_offsets.push(ClockOffset {
            collection_time,
            offset,
        });
    }

    /// Rows observed so far.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// First explicit timestamp observed.
    pub fn first_timestamp(&self) -> Option<f64> {
        self.first_timestamp
    }

    /// Last explicit timestamp observed.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Recorded clock offsets, oldest first.
    pub fn clock_offsets(&self) -> &[ClockOffset] {
        &self.clock_offsets
    }

    /// Render the footer XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\"?><info>");
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "<first_timestamp>{}</first_timestamp><last_timestamp>{}</last_timestamp><sample_count>{}</sample_count>",
            self.first_timestamp.unwrap_or(0.0),
            self.last_timestamp.unwrap_or(0.0),
            self.sample_count
        );
        xml.push_str("<clock_offsets>");
        for o in &self.clock_offsets {
            let _ = write!(
                xml,
                "<offset><time>{}</time><value>{}</value></offset>",
                o.collection_time, o.offset
            );
        }
        xml.push_str("</clock_offsets></info>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_footer() {
        let footer = StreamFooter::new();
        assert_eq!(
            footer.to_xml(),
            "<?xml version=\"1.0\"?><info><first_timestamp>0</first_timestamp>\
             <last_timestamp>0</last_timestamp><sample_count>0</sample_count>\
             <clock_offsets></clock_offsets></info>"
        );
    }

    #[test]
    fn test_observe_skips_deduced_timestamps() {
        let mut footer = StreamFooter::new();
        footer.observe(&[5.1, 0.0, 0.0]);
        footer.observe(&[5.5, 0.0]);
        footer.observe(&[0.0]);

        assert_eq!(footer.sample_count(), 6);
        assert_eq!(footer.first_timestamp(), Some(5.1));
        assert_eq!(footer.last_timestamp(), Some(5.5));
    }

    #[test]
    fn test_footer_xml_with_offsets() {
        let mut footer = StreamFooter::new();
        footer.observe(&[5.1, 5.9]);
        footer.add_clock_offset(50979.76, -0.01);
        footer.add_clock_offset(50979.86, -0.02);

        let xml = footer.to_xml();
        assert!(xml.contains("<first_timestamp>5.1</first_timestamp>"));
        assert!(xml.contains("<last_timestamp>5.9</last_timestamp>"));
        assert!(xml.contains("<sample_count>2</sample_count>"));
        assert!(xml.contains(
            "<clock_offsets><offset><time>50979.76</time><value>-0.01</value></offset>\
             <offset><time>50979.86</time><value>-0.02</value></offset></clock_offsets>"
        ));
        assert_eq!(footer.clock_offsets().len(), 2);
    }
}
