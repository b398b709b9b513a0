//! Bulletin issue-time extraction
//!
//! NAVTEX bulletins carry their issue time as a line like
//!
//! ```txt
//! 291205 UTC APR 23
//! ```
//!
//! i.e. day-of-month, hour, and minute packed into six digits, the
//! literal `UTC`, a three-letter month abbreviation, and an
//! optional two-digit year. Month names appear in English or in
//! German, depending on the issuing station; both are resolved
//! against static tables here rather than through any process-wide
//! locale state.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

#[cfg(not(test))]
use log::warn;

#[cfg(test)]
use std::println as warn;

/// English three-letter month abbreviations
static MONTHS_EN: phf::Map<&'static str, u32> = phf_map! {
    "JAN" => 1,
    "FEB" => 2,
    "MAR" => 3,
    "APR" => 4,
    "MAY" => 5,
    "JUN" => 6,
    "JUL" => 7,
    "AUG" => 8,
    "SEP" => 9,
    "OCT" => 10,
    "NOV" => 11,
    "DEC" => 12,
};

/// German three-letter month abbreviations
///
/// ASCII forms only. The timestamp pattern admits `[A-Z]{3}`, so
/// `MÄR` can never reach the lookup; German stations broadcast
/// `MRZ`.
static MONTHS_DE: phf::Map<&'static str, u32> = phf_map! {
    "JAN" => 1,
    "FEB" => 2,
    "MRZ" => 3,
    "APR" => 4,
    "MAI" => 5,
    "JUN" => 6,
    "JUL" => 7,
    "AUG" => 8,
    "SEP" => 9,
    "OKT" => 10,
    "NOV" => 11,
    "DEZ" => 12,
};

/// Resolve a three-letter month abbreviation
///
/// The English table is consulted first, then the German one.
///
/// ```
/// use navtexgeo::timestamp::month_from_abbr;
///
/// assert_eq!(Some(3), month_from_abbr("MAR"));
/// assert_eq!(Some(3), month_from_abbr("MRZ"));
/// assert_eq!(Some(10), month_from_abbr("OKT"));
/// assert_eq!(None, month_from_abbr("XYZ"));
/// ```
pub fn month_from_abbr(abbr: &str) -> Option<u32> {
    MONTHS_EN
        .get(abbr)
        .or_else(|| MONTHS_DE.get(abbr))
        .copied()
}

/// Extract an issue time from a single line
///
/// Returns `None` if the line is not timestamp-shaped at all.
/// A matching line always yields a timestamp: fields which cannot
/// be resolved are taken from `fallback` instead, with a warning.
///
/// * Unknown month abbreviation: `fallback`'s month.
/// * Missing year: `fallback`'s year. A present two-digit year is
///   offset by +2000.
/// * A field combination which does not form a valid calendar
///   date (e.g. day 31 of a 30-day month): the whole `fallback`.
pub fn from_line(line: &str, fallback: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    let mtc = RE_TIMESTAMP.captures(line)?;

    // two-digit numeric classes: the unwraps cannot fail
    let day: u32 = mtc[1].parse().unwrap();
    let hour: u32 = mtc[2].parse().unwrap();
    let minute: u32 = mtc[3].parse().unwrap();

    let month = match month_from_abbr(&mtc[4]) {
        Some(month) => month,
        None => {
            warn!(
                "unknown locale for month \"{}\"; assuming month {}",
                &mtc[4],
                fallback.month()
            );
            fallback.month()
        }
    };

    let year = match mtc.get(5) {
        Some(yy) => 2000 + yy.as_str().parse::<i32>().unwrap(),
        None => fallback.year(),
    };

    match Utc
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
    {
        Some(ts) => Some(ts),
        None => {
            warn!(
                "timestamp {:02}{:02}{:02} month {} year {} is not a valid date",
                day, hour, minute, month, year
            );
            Some(*fallback)
        }
    }
}

lazy_static! {
    static ref RE_TIMESTAMP: Regex =
        Regex::new(r"^\s*(\d{2})(\d{2})(\d{2})\s+UTC\s+([A-Z]{3})(?:\s+(\d{2}))?")
            .expect("bad timestamp regexp");
}
