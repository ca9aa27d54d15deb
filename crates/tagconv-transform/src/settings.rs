//! Validation of user-entered pipeline settings.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tagconv_model::{PipelineSettings, RangeBound};
use tracing::warn;

use crate::error::{Result, TransformError};

/// Largest accepted hour offset in either direction (one week).
pub const MAX_HOUR_OFFSET: i32 = 168;

const BOUND_DATE_FORMATS: [&str; 2] = ["%d-%b-%Y", "%Y-%m-%d"];
const BOUND_TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parses an hour offset as typed by a user (`-5`, `0`, `+3`).
///
/// # Errors
///
/// Returns [`TransformError::InvalidHourOffset`] for non-integer text and
/// [`TransformError::HourOffsetOutOfRange`] beyond [`MAX_HOUR_OFFSET`].
pub fn parse_hour_offset(text: &str) -> Result<i32> {
    let hours: i64 = text
        .trim()
        .parse()
        .map_err(|_| TransformError::InvalidHourOffset {
            value: text.to_string(),
        })?;
    validate_hour_offset(hours)
}

/// Checks that an hour offset lies within the supported range.
pub fn validate_hour_offset(hours: i64) -> Result<i32> {
    let max = i64::from(MAX_HOUR_OFFSET);
    if !(-max..=max).contains(&hours) {
        return Err(TransformError::HourOffsetOutOfRange {
            hours,
            max: MAX_HOUR_OFFSET,
        });
    }
    i32::try_from(hours).map_err(|_| TransformError::HourOffsetOutOfRange {
        hours,
        max: MAX_HOUR_OFFSET,
    })
}

/// Last second of a day, the default end-bound time.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => panic!("23:59:59 is a valid time"),
};

/// Which side of the time range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Start,
    End,
}

impl BoundKind {
    /// Time of day used when the bound has no usable time.
    pub fn default_time(self) -> NaiveTime {
        match self {
            Self::Start => NaiveTime::MIN,
            Self::End => END_OF_DAY,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Resolved time-range filter with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl TimeRange {
    /// Resolves the enabled bounds of `settings`.
    ///
    /// Returns `Ok(None)` when neither bound is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidRangeBound`] if an enabled bound has
    /// a date that does not parse.
    pub fn from_settings(settings: &PipelineSettings) -> Result<Option<Self>> {
        let start = settings
            .active_start()
            .map(|bound| resolve_bound(bound, BoundKind::Start))
            .transpose()?;
        let end = settings
            .active_end()
            .map(|bound| resolve_bound(bound, BoundKind::End))
            .transpose()?;
        if start.is_none() && end.is_none() {
            return Ok(None);
        }
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            warn!(%start, %end, "range filter start is after end; no records will match");
        }
        Ok(Some(Self { start, end }))
    }

    /// Returns true if `instant` lies within both enabled bounds.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start.is_none_or(|start| instant >= start)
            && self.end.is_none_or(|end| instant <= end)
    }
}

/// Combines a bound's date and time into an instant.
///
/// The time falls back to [`BoundKind::default_time`] when it is missing or
/// does not parse.
pub fn resolve_bound(bound: &RangeBound, kind: BoundKind) -> Result<NaiveDateTime> {
    let date = parse_bound_date(&bound.date).ok_or_else(|| TransformError::InvalidRangeBound {
        bound: kind,
        value: bound.date.clone(),
    })?;
    let time = match bound.time.as_deref().map(str::trim) {
        None | Some("") => kind.default_time(),
        Some(text) => parse_bound_time(text).unwrap_or_else(|| {
            warn!(bound = %kind, time = text, "unrecognized range time, using default");
            kind.default_time()
        }),
    };
    Ok(date.and_time(time))
}

fn parse_bound_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    BOUND_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn parse_bound_time(value: &str) -> Option<NaiveTime> {
    BOUND_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn hour_offset_accepts_signed_integers() {
        assert_eq!(parse_hour_offset("-5").unwrap(), -5);
        assert_eq!(parse_hour_offset("+3").unwrap(), 3);
        assert_eq!(parse_hour_offset(" 0 ").unwrap(), 0);
    }

    #[test]
    fn hour_offset_rejects_non_integers() {
        for text in ["", "1.5", "five", "--1"] {
            assert!(matches!(
                parse_hour_offset(text),
                Err(TransformError::InvalidHourOffset { .. })
            ));
        }
    }

    #[test]
    fn hour_offset_rejects_out_of_range() {
        assert_eq!(parse_hour_offset("168").unwrap(), 168);
        assert!(matches!(
            parse_hour_offset("169"),
            Err(TransformError::HourOffsetOutOfRange { hours: 169, .. })
        ));
        assert!(matches!(
            validate_hour_offset(i64::MIN),
            Err(TransformError::HourOffsetOutOfRange { .. })
        ));
    }

    #[test]
    fn bound_accepts_canonical_and_iso_dates() {
        let canonical = RangeBound::on("25-Nov-2025", Some("14:02:03"));
        assert_eq!(
            resolve_bound(&canonical, BoundKind::Start).unwrap(),
            at(2025, 11, 25, 14, 2, 3)
        );
        let iso = RangeBound::on("2025-11-25", Some("14:02"));
        assert_eq!(
            resolve_bound(&iso, BoundKind::Start).unwrap(),
            at(2025, 11, 25, 14, 2, 0)
        );
    }

    #[test]
    fn default_time_spans_the_whole_day() {
        assert_eq!(BoundKind::Start.default_time(), NaiveTime::MIN);
        assert_eq!(
            BoundKind::End.default_time(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
    }

    #[test]
    fn bound_time_defaults_by_side() {
        let missing = RangeBound::on("25-Nov-2025", None);
        assert_eq!(
            resolve_bound(&missing, BoundKind::Start).unwrap(),
            at(2025, 11, 25, 0, 0, 0)
        );
        let garbled = RangeBound::on("25-Nov-2025", Some("late"));
        assert_eq!(
            resolve_bound(&garbled, BoundKind::End).unwrap(),
            at(2025, 11, 25, 23, 59, 59)
        );
    }

    #[test]
    fn bound_with_bad_date_is_rejected() {
        let bad = RangeBound::on("11/25/2025", None);
        assert!(matches!(
            resolve_bound(&bad, BoundKind::End),
            Err(TransformError::InvalidRangeBound {
                bound: BoundKind::End,
                ..
            })
        ));
    }

    #[test]
    fn disabled_bad_bound_is_ignored() {
        let settings = PipelineSettings::new().with_start_filter(RangeBound {
            enabled: false,
            date: "not a date".to_string(),
            time: None,
        });
        assert_eq!(TimeRange::from_settings(&settings).unwrap(), None);
    }

    #[test]
    fn range_is_inclusive() {
        let range = TimeRange {
            start: Some(at(2025, 1, 1, 0, 0, 0)),
            end: Some(at(2025, 1, 1, 23, 59, 59)),
        };
        assert!(range.contains(at(2025, 1, 1, 0, 0, 0)));
        assert!(range.contains(at(2025, 1, 1, 23, 59, 59)));
        assert!(!range.contains(at(2025, 1, 2, 0, 0, 0)));

        let open_end = TimeRange {
            start: Some(at(2025, 1, 1, 0, 0, 0)),
            end: None,
        };
        assert!(open_end.contains(at(2999, 1, 1, 0, 0, 0)));
    }
}
