//! NAVTEX subject indicator (B2) codes

use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;

/// NAVTEX subject indicator character
///
/// The second character of a bulletin's call sign classifies its
/// subject. Subject indicators may be converted `from()` their
/// single-character representation. Using them `.as_ref()` shows
/// the character; `Display` shows a human-readable string.
///
/// ```
/// use navtexgeo::SubjectIndicator;
///
/// let subj = SubjectIndicator::from('B');
/// assert_eq!(SubjectIndicator::MeteorologicalWarning, subj);
/// assert_eq!("B", subj.as_ref());
/// assert_eq!("Meteorological warning", &format!("{}", subj));
///
/// assert_eq!(SubjectIndicator::Unknown, SubjectIndicator::from('Q'));
/// ```
///
/// Receivers may not suppress subjects `A`, `B`, `D`, and `L`;
/// all others are optional at the operator's discretion. This
/// crate decodes every assigned character and maps the rest to
/// [`Unknown`](SubjectIndicator::Unknown).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage, strum_macros::EnumString,
)]
pub enum SubjectIndicator {
    /// An unassigned (and possibly invalid) subject character
    #[strum(serialize = "?", detailed_message = "Unknown subject")]
    Unknown,

    /// Coastal navigational warning
    #[strum(serialize = "A", detailed_message = "Navigational warning")]
    NavigationalWarning,

    /// Gale and storm warnings
    #[strum(serialize = "B", detailed_message = "Meteorological warning")]
    MeteorologicalWarning,

    /// Ice report
    #[strum(serialize = "C", detailed_message = "Ice report")]
    IceReport,

    /// Search-and-rescue information and piracy warnings
    #[strum(serialize = "D", detailed_message = "Search and rescue information")]
    SearchAndRescueInfo,

    /// Meteorological forecast
    #[strum(serialize = "E", detailed_message = "Meteorological forecast")]
    MeteorologicalForecast,

    /// Pilot service message
    #[strum(serialize = "F", detailed_message = "Pilot service message")]
    PilotServiceMessage,

    /// AIS service message
    #[strum(serialize = "G", detailed_message = "AIS service message")]
    AisServiceMessage,

    /// LORAN service message
    #[strum(serialize = "H", detailed_message = "LORAN message")]
    LoranMessage,

    /// Satellite navigation service message
    #[strum(serialize = "J", detailed_message = "Satellite navigation message")]
    SatnavMessage,

    /// Other electronic navigational aid service message
    #[strum(serialize = "K", detailed_message = "Other electronic navaid message")]
    OtherNavaidMessage,

    /// Additional navigational warnings (overflow from `A`)
    #[strum(serialize = "L", detailed_message = "Additional navigational warning")]
    NavigationalWarningExtra,

    /// "QRU": the station has no traffic on hand
    #[strum(serialize = "Z", detailed_message = "No message on hand")]
    NoMessageOnHand,
}

impl SubjectIndicator {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Single-character NAVTEX representation
    pub fn as_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl From<char> for SubjectIndicator {
    fn from(c: char) -> SubjectIndicator {
        let mut buf = [0u8; 4];
        match SubjectIndicator::from_str(c.encode_utf8(&mut buf)) {
            Ok(subj) => subj,
            Err(_e) => SubjectIndicator::Unknown,
        }
    }
}

impl AsRef<str> for SubjectIndicator {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for SubjectIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_round_trip() {
        for (c, subj) in [
            ('A', SubjectIndicator::NavigationalWarning),
            ('B', SubjectIndicator::MeteorologicalWarning),
            ('C', SubjectIndicator::IceReport),
            ('D', SubjectIndicator::SearchAndRescueInfo),
            ('E', SubjectIndicator::MeteorologicalForecast),
            ('F', SubjectIndicator::PilotServiceMessage),
            ('G', SubjectIndicator::AisServiceMessage),
            ('H', SubjectIndicator::LoranMessage),
            ('J', SubjectIndicator::SatnavMessage),
            ('K', SubjectIndicator::OtherNavaidMessage),
            ('L', SubjectIndicator::NavigationalWarningExtra),
            ('Z', SubjectIndicator::NoMessageOnHand),
        ] {
            assert_eq!(subj, SubjectIndicator::from(c));
            assert_eq!(c.to_string(), subj.as_ref());
        }
    }

    #[test]
    fn test_unassigned_subjects() {
        assert_eq!(SubjectIndicator::Unknown, SubjectIndicator::from('I'));
        assert_eq!(SubjectIndicator::Unknown, SubjectIndicator::from('Q'));
        assert_eq!(SubjectIndicator::Unknown, SubjectIndicator::from('a'));
        assert_eq!("Unknown subject", SubjectIndicator::Unknown.as_display_str());
    }
}
