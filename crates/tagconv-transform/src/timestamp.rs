//! Timestamp parsing and formatting.
//!
//! Source exports use a US-locale 12-hour timestamp with an optional
//! fraction glued to the AM/PM marker:
//!
//! ```text
//! 11/25/2025 2:02:03 PM.2390000
//! ```
//!
//! Output uses the canonical form `DD-Mon-YYYY HH:MM:SS`:
//!
//! ```text
//! 25-Nov-2025 14:02:03
//! ```
//!
//! Sub-second precision is discarded; instants have second resolution.

use std::borrow::Cow;

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;

/// Source grammar after the fraction has been removed.
pub const SOURCE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Canonical output grammar.
pub const CANONICAL_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

/// Instant used to order records whose timestamp did not parse.
///
/// Lower than any timestamp the source grammar can produce.
pub const SENTINEL_INSTANT: NaiveDateTime = NaiveDateTime::MIN;

/// A source timestamp that did not match the source grammar.
///
/// Carries the original text verbatim so callers can display it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized timestamp '{original}'")]
pub struct TimestampParseFailure {
    pub original: String,
}

/// Parses a source timestamp into an instant.
///
/// Surrounding whitespace and one pair of enclosing double quotes are
/// removed first. A fraction appended to the marker (`PM.2390000`) is
/// dropped before parsing.
///
/// # Errors
///
/// Returns [`TimestampParseFailure`] holding `raw` unchanged when the text
/// does not match `M/D/YYYY h:mm:ss AM|PM`.
pub fn parse_source_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampParseFailure> {
    let failure = || TimestampParseFailure {
        original: raw.to_string(),
    };
    let cleaned = strip_fraction(strip_enclosing_quotes(raw.trim()));
    // chrono lets the space before %p match nothing
    if !marker_is_separated(&cleaned) {
        return Err(failure());
    }
    NaiveDateTime::parse_from_str(&cleaned, SOURCE_FORMAT).map_err(|_| failure())
}

/// Formats an instant in the canonical output grammar.
pub fn format_canonical(instant: NaiveDateTime) -> String {
    instant.format(CANONICAL_FORMAT).to_string()
}

/// Parses a canonical timestamp back into an instant.
pub fn parse_canonical(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, CANONICAL_FORMAT).ok()
}

/// Shifts an instant by a whole number of hours.
///
/// The shift is linear: no daylight-saving adjustment, and date or year
/// boundaries may be crossed. Saturates at the representable range.
pub fn apply_offset(instant: NaiveDateTime, hours: i32) -> NaiveDateTime {
    instant
        .checked_add_signed(TimeDelta::hours(i64::from(hours)))
        .unwrap_or(if hours < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// Converts one source timestamp to canonical form with an hour offset.
///
/// Text that does not parse is returned unchanged and the offset is not
/// applied.
pub fn convert_timestamp(raw: &str, hours: i32) -> String {
    match parse_source_timestamp(raw) {
        Ok(instant) => format_canonical(apply_offset(instant, hours)),
        Err(failure) => failure.original,
    }
}

fn strip_enclosing_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

/// Returns true if whitespace precedes the trailing two-letter marker.
fn marker_is_separated(value: &str) -> bool {
    let Some(split) = value.len().checked_sub(2) else {
        return false;
    };
    value.is_char_boundary(split) && value[..split].ends_with(char::is_whitespace)
}

/// Cuts everything from the dot after the AM/PM marker.
fn strip_fraction(value: &str) -> Cow<'_, str> {
    for marker in [" AM.", " PM."] {
        if let Some(pos) = value.find(marker) {
            let bare = &marker[..marker.len() - 1];
            return Cow::Owned(format!("{}{}", &value[..pos], bare));
        }
    }
    Cow::Borrowed(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parse_afternoon_with_fraction() {
        assert_eq!(
            parse_source_timestamp("11/25/2025 2:02:03 PM.2390000"),
            Ok(at(2025, 11, 25, 14, 2, 3))
        );
    }

    #[test]
    fn parse_morning_without_leading_zeros() {
        assert_eq!(
            parse_source_timestamp("12/3/2025 5:28:11 AM.7480000"),
            Ok(at(2025, 12, 3, 5, 28, 11))
        );
    }

    #[test]
    fn parse_midnight_and_noon() {
        assert_eq!(
            parse_source_timestamp("1/1/2025 12:00:00 AM"),
            Ok(at(2025, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_source_timestamp("1/1/2025 12:00:00 PM"),
            Ok(at(2025, 1, 1, 12, 0, 0))
        );
    }

    #[test]
    fn parse_strips_whitespace_and_one_quote_pair() {
        assert_eq!(
            parse_source_timestamp("  \"11/25/2025 2:02:03 PM\"  "),
            Ok(at(2025, 11, 25, 14, 2, 3))
        );
        assert!(parse_source_timestamp("\"\"11/25/2025 2:02:03 PM\"\"").is_err());
    }

    #[test]
    fn parse_requires_space_before_marker() {
        assert!(parse_source_timestamp("11/25/2025 2:02:03PM").is_err());
        assert!(parse_source_timestamp("11/25/2025 2:02:03PM.2390000").is_err());
        assert_eq!(
            parse_source_timestamp("11/25/2025 2:02:03 pm"),
            Ok(at(2025, 11, 25, 14, 2, 3))
        );
    }

    #[test]
    fn parse_failure_keeps_original_text() {
        let failure = parse_source_timestamp("  not a time ").unwrap_err();
        assert_eq!(failure.original, "  not a time ");
    }

    #[test]
    fn parse_rejects_canonical_and_invalid_dates() {
        assert!(parse_source_timestamp("25-Nov-2025 14:02:03").is_err());
        assert!(parse_source_timestamp("2/30/2025 1:00:00 PM").is_err());
        assert!(parse_source_timestamp("13/1/2025 1:00:00 PM").is_err());
        assert!(parse_source_timestamp("").is_err());
    }

    #[test]
    fn format_is_zero_padded_24_hour() {
        assert_eq!(
            format_canonical(at(2025, 3, 4, 5, 6, 7)),
            "04-Mar-2025 05:06:07"
        );
        assert_eq!(
            format_canonical(at(2025, 11, 25, 14, 2, 3)),
            "25-Nov-2025 14:02:03"
        );
    }

    #[test]
    fn offset_crosses_year_boundary() {
        let instant = at(2025, 12, 31, 22, 0, 0);
        assert_eq!(apply_offset(instant, 3), at(2026, 1, 1, 1, 0, 0));
        assert_eq!(apply_offset(instant, -23), at(2025, 12, 30, 23, 0, 0));
        assert_eq!(apply_offset(instant, 0), instant);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        assert_eq!(apply_offset(NaiveDateTime::MIN, -1), NaiveDateTime::MIN);
        assert_eq!(apply_offset(NaiveDateTime::MAX, 1), NaiveDateTime::MAX);
    }

    #[test]
    fn convert_applies_offset_or_falls_back() {
        assert_eq!(
            convert_timestamp("1/1/2025 12:00:00 AM", 5),
            "01-Jan-2025 05:00:00"
        );
        assert_eq!(convert_timestamp("garbage", 5), "garbage");
    }

    #[test]
    fn canonical_parse_accepts_formatted_output() {
        let instant = at(2024, 2, 29, 23, 59, 59);
        assert_eq!(parse_canonical(&format_canonical(instant)), Some(instant));
        assert_eq!(parse_canonical("11/25/2025 2:02:03 PM"), None);
    }

    #[test]
    fn sentinel_sorts_before_parsed_values() {
        let earliest = parse_source_timestamp("1/1/0001 12:00:00 AM").unwrap();
        assert!(SENTINEL_INSTANT < earliest);
    }
}
