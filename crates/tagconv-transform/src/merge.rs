//! Merging ingested records into a chronologically sorted source set.

use chrono::NaiveDateTime;
use tagconv_model::RawRecord;
use tracing::debug;

use crate::timestamp::{SENTINEL_INSTANT, parse_source_timestamp};

/// A raw record together with the instant parsed at merge time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub raw: RawRecord,
    /// `None` when the raw timestamp did not parse.
    pub instant: Option<NaiveDateTime>,
}

impl SourceRecord {
    /// Parses the record's timestamp once.
    pub fn new(raw: RawRecord) -> Self {
        let instant = parse_source_timestamp(&raw.raw_timestamp).ok();
        Self { raw, instant }
    }

    /// Instant used for ordering; unparsable records use the sentinel.
    pub fn sort_key(&self) -> NaiveDateTime {
        self.instant.unwrap_or(SENTINEL_INSTANT)
    }
}

/// Merged source records, sorted ascending by parsed instant.
///
/// Records whose timestamp did not parse come first, in their original
/// relative order. Only built through [`sort_records`] or [`merge_sets`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    records: Vec<SourceRecord>,
}

impl SourceSet {
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records whose timestamp did not parse.
    pub fn unparsed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.instant.is_none())
            .count()
    }

    /// Earliest and latest parsed instants, if any record parsed.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut parsed = self.records.iter().filter_map(|record| record.instant);
        let first = parsed.next()?;
        let last = parsed.last().unwrap_or(first);
        Some((first, last))
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a SourceRecord;
    type IntoIter = std::slice::Iter<'a, SourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parses every record's timestamp and stable-sorts by instant.
///
/// Records sharing an instant, including the unparsable ones, keep their
/// input order, so sorting an already sorted input is a no-op.
pub fn sort_records(records: Vec<RawRecord>) -> SourceSet {
    let mut records: Vec<SourceRecord> = records.into_iter().map(SourceRecord::new).collect();
    records.sort_by_key(SourceRecord::sort_key);
    let set = SourceSet { records };
    debug!(
        records = set.len(),
        unparsed = set.unparsed_count(),
        "sorted source records"
    );
    set
}

/// Concatenates ingested files in order, then sorts the result.
pub fn merge_sets(sets: Vec<Vec<RawRecord>>) -> SourceSet {
    sort_records(sets.into_iter().flatten().collect())
}
