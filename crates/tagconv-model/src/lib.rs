//! Data model for tag record conversion.
//!
//! - **record**: raw input records and converted output records
//! - **settings**: pipeline settings supplied on every conversion run
//! - **result**: conversion results and per-stage removal counts

pub mod record;
pub mod result;
pub mod settings;

pub use record::{BAD_QUALITY_CODE, OutputRecord, RawRecord};
pub use result::{ConversionResult, RemovalCounts};
pub use settings::{PipelineSettings, RangeBound, TagMode};
