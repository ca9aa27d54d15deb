//! Tag record transformation.
//!
//! This crate provides the conversion logic between ingestion and output:
//!
//! - **timestamp**: parsing of source timestamps and canonical formatting
//! - **merge**: merging ingested records into a chronologically sorted set
//! - **settings**: validation of hour offsets and time-range bounds
//! - **pipeline**: the filtering and conversion pipeline

pub mod error;
pub mod merge;
pub mod pipeline;
pub mod settings;
pub mod timestamp;

pub use error::{Result, TransformError};
pub use merge::{SourceRecord, SourceSet, merge_sets, sort_records};
pub use pipeline::{ConvertedRecord, convert};
pub use settings::{BoundKind, MAX_HOUR_OFFSET, TimeRange, parse_hour_offset, validate_hour_offset};
pub use timestamp::{
    SENTINEL_INSTANT, TimestampParseFailure, apply_offset, convert_timestamp, format_canonical,
    parse_canonical, parse_source_timestamp,
};
