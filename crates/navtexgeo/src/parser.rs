//! Bulletin parsing
//!
//! Drives one *parsing pass*: the input line sequence is cut into
//! blocks by the [`Segmenter`](crate::segment::Segmenter), each
//! block is folded line-by-line through a [`BlockScan`]
//! accumulator, and every block with at least one position becomes
//! a [`Feature`].
//!
//! The wall-clock time at the start of the pass serves as the
//! fallback timestamp for every block of that pass.

use chrono::{DateTime, Utc};

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use crate::feature::{Feature, FeatureCollection};
use crate::geometry::Geometry;
use crate::message::{self, MessageHeader};
use crate::position::{self, Position};
use crate::segment::{MessageBlock, Segmenter};
use crate::timestamp;

/// Per-block extraction state
///
/// Accumulates the fields of one bulletin as its lines are folded
/// through [`update()`](BlockScan::update). Every per-line check
/// runs independently: a line may simultaneously raise a keyword
/// flag and contribute positions.
///
/// First match wins for the header and the timestamp; later
/// header- or timestamp-shaped lines within the same block are
/// ignored.
#[derive(Clone, Debug, Default)]
struct BlockScan {
    header: Option<MessageHeader>,
    issued: Option<DateTime<Utc>>,
    has_area: bool,
    has_track: bool,
    positions: Vec<Position>,
}

impl BlockScan {
    /// Fold one line into the accumulated state
    fn update(mut self, line: &str, fallback: &DateTime<Utc>) -> Self {
        if self.header.is_none() {
            if let Some(hdr) = MessageHeader::from_line(line) {
                debug!("call sign {}: {}", hdr.call_sign(), hdr.subject());
                self.header = Some(hdr);
            }
        }

        self.has_area = self.has_area || message::mentions_area(line);
        self.has_track = self.has_track || message::mentions_track(line);

        if self.issued.is_none() {
            self.issued = timestamp::from_line(line, fallback);
        }

        self.positions.extend(position::positions_in_line(line));
        self
    }

    /// Conclude the block
    ///
    /// Synthesizes the geometry and assembles a [`Feature`].
    /// Blocks without positions yield `None`.
    fn finish(self, text: String, fallback: &DateTime<Utc>) -> Option<Feature> {
        let geometry = Geometry::synthesize(self.positions, self.has_area, self.has_track)?;
        Some(Feature::new(
            self.header.as_ref(),
            self.issued.unwrap_or(*fallback),
            text,
            geometry,
        ))
    }
}

/// Parse one terminated block into a feature
///
/// `fallback` supplies the timestamp fields that the block text
/// does not. Returns `None` when the block contains no positions.
pub fn parse_block(block: &MessageBlock, fallback: &DateTime<Utc>) -> Option<Feature> {
    let scan = block
        .lines()
        .iter()
        .fold(BlockScan::default(), |scan, line| {
            scan.update(line, fallback)
        });
    scan.finish(block.text(), fallback)
}

/// Run a full parsing pass over a line sequence
///
/// The fallback timestamp is captured once, at the start of the
/// pass. An unterminated trailing block contributes nothing.
pub fn parse_lines<I, S>(lines: I) -> FeatureCollection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_at(lines, Utc::now())
}

/// Like [`parse_lines`], with an explicit fallback timestamp
pub fn parse_lines_at<I, S>(lines: I, fallback: DateTime<Utc>) -> FeatureCollection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = FeatureCollection::new();
    for block in Segmenter::segment(lines) {
        if let Some(feature) = parse_block(&block, &fallback) {
            out.push(feature);
        }
    }
    out
}
