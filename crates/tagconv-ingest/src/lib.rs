//! Tag record ingestion.
//!
//! Reads one or more headerless exports of `timestamp,value,quality` lines
//! and merges them into a single chronologically sorted
//! [`SourceSet`](tagconv_transform::SourceSet).
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tagconv_ingest::ingest;
//!
//! let result = ingest(&[Path::new("FIC101.csv"), Path::new("FIC101_part2.csv")])?;
//! println!("{} rows, tag {:?}", result.source.len(), result.default_tag_name);
//! ```

mod error;
mod reader;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tagconv_transform::{SourceSet, merge_sets};
use tracing::{info, info_span, warn};

// === Error Types ===
pub use error::{IngestError, Result};

// === File Reading ===
pub use reader::{
    FIELDS_PER_LINE, MAX_SOURCE_FILE_SIZE, SourceFile, check_file_size_with_limit, decode_text,
    parse_records, read_source_file,
};

/// Summary of one ingested file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedFile {
    pub path: PathBuf,
    pub rows: usize,
    pub encoding: &'static str,
}

/// Outcome of an ingest call.
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Merged records from every file, sorted by timestamp.
    pub source: SourceSet,
    /// Files in the order they were read.
    pub files: Vec<IngestedFile>,
    /// Base name of the first file without extension; a default tag name.
    pub default_tag_name: Option<String>,
}

/// Reads every file in order and merges the records.
///
/// # Errors
///
/// The first unreadable or malformed file aborts the whole call.
pub fn ingest<P: AsRef<Path>>(paths: &[P]) -> Result<IngestResult> {
    let Some(first) = paths.first() else {
        return Err(IngestError::NoInputFiles);
    };
    let span = info_span!("ingest", files = paths.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut files = Vec::with_capacity(paths.len());
    let mut sets = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let SourceFile { records, encoding } = read_source_file(path)?;
        if records.is_empty() {
            warn!(path = %path.display(), "source file has no records");
        }
        files.push(IngestedFile {
            path: path.to_path_buf(),
            rows: records.len(),
            encoding,
        });
        sets.push(records);
    }

    let source = merge_sets(sets);
    let (first_ts, last_ts) = source.time_span().unzip();
    info!(
        rows = source.len(),
        unparsed = source.unparsed_count(),
        first = ?first_ts,
        last = ?last_ts,
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );

    Ok(IngestResult {
        source,
        files,
        default_tag_name: base_name(first.as_ref()),
    })
}

/// File name without directory and extension.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}
