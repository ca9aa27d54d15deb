//! Conversion session with explicit stages.
//!
//! 1. **Upload**: read and merge source files into a sorted set
//! 2. **Apply**: run the conversion pipeline with the current settings
//! 3. **Download**: write converted records to a file
//!
//! The caller holds the [`SourceSet`] returned by upload and may apply
//! any number of settings to it.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tagconv_ingest::{IngestResult, IngestedFile, ingest};
use tagconv_model::{ConversionResult, OutputRecord, PipelineSettings};
use tagconv_output::{WriteOptions, WriteSummary, write_output};
use tagconv_transform::{SourceSet, convert};

// ============================================================================
// Stage 1: Upload
// ============================================================================

/// Result of the upload stage.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Merged records sorted by timestamp.
    pub source: SourceSet,
    /// Per-file row counts, in the order given.
    pub files: Vec<IngestedFile>,
    /// Base name of the first file, used for filename tags.
    pub default_tag_name: Option<String>,
}

impl Upload {
    pub fn row_count(&self) -> usize {
        self.source.len()
    }

    /// Display name of the first file, with a count of any others.
    pub fn label(&self) -> String {
        let first = self
            .files
            .first()
            .and_then(|file| file.path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.files.len() {
            0 | 1 => first,
            count => format!("{first} (+{} more)", count - 1),
        }
    }
}

/// Read and merge the given files.
pub fn upload(paths: &[PathBuf]) -> Result<Upload> {
    let span = info_span!("upload", files = paths.len());
    let _guard = span.enter();
    let IngestResult {
        source,
        files,
        default_tag_name,
    } = ingest(paths).context("read source files")?;
    Ok(Upload {
        source,
        files,
        default_tag_name,
    })
}

// ============================================================================
// Stage 2: Apply
// ============================================================================

/// Convert the held source records with `settings`.
pub fn apply(source: &SourceSet, settings: &PipelineSettings) -> Result<ConversionResult> {
    convert(source, settings).context("invalid conversion settings")
}

// ============================================================================
// Stage 3: Download
// ============================================================================

/// Write converted records to `target`.
pub fn download(
    records: &[OutputRecord],
    target: &Path,
    options: &WriteOptions,
) -> Result<WriteSummary> {
    let span = info_span!("download", path = %target.display());
    let _guard = span.enter();
    let start = Instant::now();
    let summary = write_output(records, target, options)
        .with_context(|| format!("write {}", target.display()))?;
    info!(
        rows = summary.rows,
        duration_ms = start.elapsed().as_millis(),
        "download complete"
    );
    Ok(summary)
}
