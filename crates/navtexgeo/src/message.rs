//! NAVTEX header line decoding

use std::convert::TryFrom;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::navcodes::SubjectIndicator;

/// Error decoding a [`MessageHeader`]
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HeaderDecodeErr {
    /// Line does not contain a `ZCZC` technical preamble
    #[error("invalid NAVTEX header: no ZCZC preamble with B1/B2/B3B4 code")]
    NoPreamble,
}

/// Identity fields of one NAVTEX bulletin
///
/// A NAVTEX bulletin announces itself on its start-marker line as
///
/// ```txt
/// ZCZC FA01
/// ```
///
/// where `F` is the transmitter (B1) character, `A` the subject
/// indicator (B2) character, and `01` the two-digit serial (B3B4).
/// The concatenation of all four characters is the bulletin's
/// *call sign*.
///
/// Headers are immutable once parsed. Within a block, only the
/// first header-shaped line counts; see
/// [`parser`](crate::parser).
///
/// ```
/// use navtexgeo::{MessageHeader, SubjectIndicator};
///
/// let hdr = MessageHeader::from_line("ZCZC FA01").expect("header");
/// assert_eq!('F', hdr.station());
/// assert_eq!('A', hdr.subject_char());
/// assert_eq!("01", hdr.serial());
/// assert_eq!("FA01", hdr.call_sign());
/// assert_eq!(SubjectIndicator::NavigationalWarning, hdr.subject());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageHeader {
    station: char,
    subject: char,
    serial: String,
}

impl MessageHeader {
    /// Extract a header from a single line
    ///
    /// Returns `None` if the line does not carry a `ZCZC`
    /// preamble followed by a station/subject/serial code.
    pub fn from_line(line: &str) -> Option<Self> {
        let mtc = RE_HEADER.captures(line)?;
        Some(Self {
            // single-letter classes: the unwraps cannot fail
            station: mtc[1].chars().next().unwrap(),
            subject: mtc[2].chars().next().unwrap(),
            serial: mtc[3].to_owned(),
        })
    }

    /// Transmitter identity (B1) character
    pub fn station(&self) -> char {
        self.station
    }

    /// Subject indicator (B2) character
    pub fn subject_char(&self) -> char {
        self.subject
    }

    /// Subject indicator, decoded
    ///
    /// Unassigned characters decode as
    /// [`SubjectIndicator::Unknown`].
    pub fn subject(&self) -> SubjectIndicator {
        SubjectIndicator::from(self.subject)
    }

    /// Two-digit serial number (B3B4), as text
    ///
    /// `00` is used for vital messages; it is preserved verbatim.
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Full call sign: station + subject + serial
    pub fn call_sign(&self) -> String {
        let mut out = String::with_capacity(4);
        out.push(self.station);
        out.push(self.subject);
        out.push_str(&self.serial);
        out
    }
}

impl fmt::Display for MessageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.station, self.subject, self.serial)
    }
}

impl TryFrom<&str> for MessageHeader {
    type Error = HeaderDecodeErr;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        Self::from_line(line).ok_or(HeaderDecodeErr::NoPreamble)
    }
}

/// Does this line mention the `AREA` keyword?
///
/// Word-boundary, case-sensitive match. The flag feeds polygon
/// selection in [`Geometry::synthesize`](crate::Geometry::synthesize).
pub fn mentions_area(line: &str) -> bool {
    RE_AREA.is_match(line)
}

/// Does this line mention the `TRACK` keyword?
///
/// Word-boundary, case-sensitive match. The flag feeds line-string
/// selection in [`Geometry::synthesize`](crate::Geometry::synthesize).
pub fn mentions_track(line: &str) -> bool {
    RE_TRACK.is_match(line)
}

lazy_static! {
    static ref RE_HEADER: Regex =
        Regex::new(r"ZCZC\s+([A-Z])([A-Z])(\d{2})").expect("bad header regexp");
    static ref RE_AREA: Regex = Regex::new(r"\bAREA\b").expect("bad area regexp");
    static ref RE_TRACK: Regex = Regex::new(r"\bTRACK\b").expect("bad track regexp");
}
