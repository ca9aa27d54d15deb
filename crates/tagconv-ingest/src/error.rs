//! Error types for record ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an ingest call. No partial source set is produced.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// No input paths were supplied.
    #[error("no input files supplied")]
    NoInputFiles,

    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Parsing Errors ===
    /// A line does not have exactly three fields.
    #[error("malformed line {line} in {path}: expected 3 fields, found {found}")]
    MalformedLine {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    /// The delimited reader rejected the file.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
