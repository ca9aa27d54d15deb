//! Conversion pipeline from a source set to output records.
//!
//! Stages run in a fixed order, each on the output of the previous one:
//!
//! 1. Quality filter (optional)
//! 2. Timestamp conversion with hour offset
//! 3. Tag name column
//! 4. Time-range filter (optional)
//! 5. Duplicate timestamp suppression (optional)
//!
//! Stages only remove records; none of them reorders.
//!
//! # Example
//!
//! ```ignore
//! use tagconv_model::PipelineSettings;
//! use tagconv_transform::{convert, sort_records};
//!
//! let source = sort_records(raw_records);
//! let settings = PipelineSettings::new().with_hour_offset(-5);
//! let result = convert(&source, &settings)?;
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use tagconv_model::{ConversionResult, OutputRecord, PipelineSettings, RemovalCounts};
use tracing::{debug, info_span};

use crate::error::Result;
use crate::merge::{SourceRecord, SourceSet};
use crate::settings::{TimeRange, validate_hour_offset};
use crate::timestamp::{apply_offset, format_canonical};

/// Runs the conversion pipeline.
///
/// The function is pure: the same source set and settings always produce
/// the same result.
///
/// # Errors
///
/// Fails before touching any record if the hour offset is out of range or
/// an enabled range bound has an unparsable date.
pub fn convert(source: &SourceSet, settings: &PipelineSettings) -> Result<ConversionResult> {
    let span = info_span!("convert", records = source.len());
    let _guard = span.enter();

    let hours = validate_hour_offset(i64::from(settings.hour_offset))?;
    let range = TimeRange::from_settings(settings)?;
    let mut counts = RemovalCounts::default();

    let mut kept: Vec<&SourceRecord> = source.iter().collect();
    if settings.remove_bad_quality {
        counts.bad_quality_removed = filter_bad_quality(&mut kept);
        debug!(removed = counts.bad_quality_removed, "quality filter");
    }

    let mut converted = convert_records(&kept, hours, settings.tag_name());

    if let Some(range) = range {
        counts.range_filtered = filter_time_range(&mut converted, &range);
        debug!(removed = counts.range_filtered, "range filter");
    }

    if settings.remove_duplicates {
        counts.duplicates_removed = remove_duplicate_timestamps(&mut converted);
        debug!(removed = counts.duplicates_removed, "duplicate filter");
    }

    let records: Vec<OutputRecord> = converted.into_iter().map(|row| row.record).collect();
    debug!(
        output = records.len(),
        removed = counts.total(),
        "conversion complete"
    );
    Ok(ConversionResult {
        records,
        counts,
        input_records: source.len(),
    })
}

/// Drops records carrying the bad-quality code. Returns the number removed.
pub fn filter_bad_quality(records: &mut Vec<&SourceRecord>) -> usize {
    let before = records.len();
    records.retain(|record| !record.raw.has_bad_quality());
    before - records.len()
}

/// An output row together with the shifted instant it was formatted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedRecord {
    pub record: OutputRecord,
    /// `None` when the source timestamp did not parse.
    pub instant: Option<NaiveDateTime>,
}

/// Builds output rows with canonical timestamps and an optional tag.
///
/// Records whose timestamp did not parse keep the raw text and are not
/// shifted.
pub fn convert_records(
    records: &[&SourceRecord],
    hours: i32,
    tag: Option<&str>,
) -> Vec<ConvertedRecord> {
    records
        .iter()
        .map(|source| {
            let instant = source.instant.map(|instant| apply_offset(instant, hours));
            ConvertedRecord {
                record: OutputRecord {
                    tagname: tag.map(str::to_string),
                    timestamp: instant.map_or_else(
                        || source.raw.raw_timestamp.clone(),
                        format_canonical,
                    ),
                    value: source.raw.value.clone(),
                },
                instant,
            }
        })
        .collect()
}

/// Keeps rows whose shifted instant lies within `range`.
///
/// Rows whose source timestamp did not parse are always dropped, even when
/// their raw text looks like a canonical timestamp. Returns the number
/// removed.
pub fn filter_time_range(records: &mut Vec<ConvertedRecord>, range: &TimeRange) -> usize {
    let before = records.len();
    records.retain(|row| row.instant.is_some_and(|instant| range.contains(instant)));
    before - records.len()
}

/// Keeps the first row for each timestamp. Returns the number removed.
pub fn remove_duplicate_timestamps(records: &mut Vec<ConvertedRecord>) -> usize {
    let before = records.len();
    let mut seen = BTreeSet::new();
    records.retain(|row| seen.insert(row.record.timestamp.clone()));
    before - records.len()
}
