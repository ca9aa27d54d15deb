//! Results of a conversion run.

use crate::record::OutputRecord;

/// Number of records removed by each filtering stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovalCounts {
    pub bad_quality_removed: usize,
    pub range_filtered: usize,
    pub duplicates_removed: usize,
}

impl RemovalCounts {
    pub fn total(&self) -> usize {
        self.bad_quality_removed + self.range_filtered + self.duplicates_removed
    }
}

/// Output of one conversion run.
///
/// Derived entirely from the source records and settings; recomputed on
/// every run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionResult {
    pub records: Vec<OutputRecord>,
    pub counts: RemovalCounts,
    /// Number of source records the run started from.
    pub input_records: usize,
}

impl ConversionResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if rows carry a tag name column.
    pub fn has_tag_column(&self) -> bool {
        self.records
            .first()
            .is_some_and(|record| record.tagname.is_some())
    }
}
