//! Coordinate extraction and normalization

use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::{Serialize, SerializeTuple, Serializer};

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

/// One geographic position, decimal degrees
///
/// Sign-encoded: north and east are positive, south and west are
/// negative. Serializes as a GeoJSON `[longitude, latitude]` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.longitude)?;
        tup.serialize_element(&self.latitude)?;
        tup.end()
    }
}

/// Extract every coordinate pair from a single line
///
/// Bulletins embed positions in free text as degrees and decimal
/// minutes with hemisphere letters:
///
/// ```txt
/// 54 21.8N 012 14.1E
/// ```
///
/// Latitude degrees are two digits and longitude degrees three;
/// minutes may carry a fraction with either `.` or `,` as the
/// separator, and single space or punctuation characters are
/// tolerated between fields. All non-overlapping matches are
/// returned in order of appearance.
///
/// ```
/// use navtexgeo::position::positions_in_line;
///
/// let pos = positions_in_line("BUOY ADRIFT 54 21.8N 012 14.1E");
/// assert_eq!(1, pos.len());
/// assert!((pos[0].latitude - 54.3633333).abs() < 1e-6);
/// assert!((pos[0].longitude - 12.235).abs() < 1e-6);
/// ```
pub fn positions_in_line(line: &str) -> Vec<Position> {
    RE_POSITION
        .captures_iter(line)
        .map(|mtc| {
            let latitude = degmin_to_decimal(&mtc[1], &mtc[2], &mtc[3]);
            let longitude = degmin_to_decimal(&mtc[4], &mtc[5], &mtc[6]);
            debug!("position: {} -> {} {}", &mtc[0], longitude, latitude);
            Position {
                longitude,
                latitude,
            }
        })
        .collect()
}

// Convert degrees and decimal minutes to signed decimal degrees
//
// The caller guarantees `deg` and `min` are regex-admitted
// numerics and `hemi` is one of N/S/E/W.
fn degmin_to_decimal(deg: &str, min: &str, hemi: &str) -> f64 {
    let deg: f64 = deg.parse().expect(PANIC_MSG);
    let min: f64 = min.replace(',', ".").parse().expect(PANIC_MSG);
    let res = deg + min / 60.0;
    match hemi {
        "N" | "E" => res,
        _ => -res,
    }
}

const PANIC_MSG: &str = "position pattern admitted a malformed coordinate";

lazy_static! {
    static ref RE_POSITION: Regex = Regex::new(
        r"(\d{2})[\s!\-](\d{2}(?:[.,]\d+)?)\s*([NS])[\s_\-]+(\d{3})[\s!\-](\d{2}(?:[.,]\d+)?)\s*([EW])"
    )
    .expect("bad position regexp");
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_decode_identities() {
        // decode(deg, min, dir) == deg + min/60
        assert_approx_eq!(48.0 + 30.5 / 60.0, degmin_to_decimal("48", "30.5", "N"));
        // southern and western hemispheres negate
        assert_approx_eq!(
            -degmin_to_decimal("48", "30.5", "N"),
            degmin_to_decimal("48", "30.5", "S")
        );
        assert_approx_eq!(
            -degmin_to_decimal("008", "15.2", "E"),
            degmin_to_decimal("008", "15.2", "W")
        );
    }

    #[test]
    fn test_single_position() {
        let pos = positions_in_line("48 30.5N 008 15.2E");
        assert_eq!(1, pos.len());
        assert_approx_eq!(48.5083333, pos[0].latitude, 1e-6);
        assert_approx_eq!(8.2533333, pos[0].longitude, 1e-6);
    }

    #[test]
    fn test_decimal_comma_and_punctuation_separators() {
        let pos = positions_in_line("55-30,25N_014-45,5E");
        assert_eq!(1, pos.len());
        assert_approx_eq!(55.5041666, pos[0].latitude, 1e-6);
        assert_approx_eq!(14.7583333, pos[0].longitude, 1e-6);
    }

    #[test]
    fn test_southern_western_hemispheres() {
        let pos = positions_in_line("34 15.0S 018 30.0W");
        assert_eq!(1, pos.len());
        assert_approx_eq!(-34.25, pos[0].latitude, 1e-6);
        assert_approx_eq!(-18.5, pos[0].longitude, 1e-6);
    }

    #[test]
    fn test_multiple_matches_per_line() {
        let pos = positions_in_line("FM 54 00N 010 00E TO 55 00N 011 00E");
        assert_eq!(2, pos.len());
        assert_approx_eq!(54.0, pos[0].latitude, 1e-6);
        assert_approx_eq!(11.0, pos[1].longitude, 1e-6);
    }

    #[test]
    fn test_no_match() {
        assert!(positions_in_line("GALE WARNING FOR AREA BALTIC").is_empty());
        // longitude degrees must be three digits
        assert!(positions_in_line("48 30.5N 08 15.2E").is_empty());
    }

    #[test]
    fn test_geojson_order() {
        let json = serde_json::to_string(&Position {
            longitude: 12.5,
            latitude: 54.25,
        })
        .unwrap();
        assert_eq!("[12.5,54.25]", json);
    }
}
