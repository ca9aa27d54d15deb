//! Reading a single source export.

use std::borrow::Cow;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tagconv_model::RawRecord;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Maximum file size for a source export (500 MB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Number of positional fields on every source line.
pub const FIELDS_PER_LINE: usize = 3;

/// Records read from one file, with the text encoding that was detected.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub records: Vec<RawRecord>,
    pub encoding: &'static str,
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads and parses one headerless `timestamp,value,quality` file.
///
/// The whole file is loaded before parsing. Blank lines are skipped.
///
/// # Errors
///
/// Fails on unreadable files and on the first line whose field count is
/// not exactly three.
pub fn read_source_file(path: &Path) -> Result<SourceFile> {
    check_file_size_with_limit(path, MAX_SOURCE_FILE_SIZE)?;
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    let (text, encoding) = decode_text(&bytes, path);
    let records = parse_records(&text, path)?;
    debug!(
        path = %path.display(),
        rows = records.len(),
        encoding,
        "read source file"
    );
    Ok(SourceFile { records, encoding })
}

/// Parses headerless three-field lines from decoded text.
pub fn parse_records(text: &str, path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if row.len() != FIELDS_PER_LINE {
            let line = row
                .position()
                .map_or(index as u64 + 1, csv::Position::line);
            return Err(IngestError::MalformedLine {
                path: path.to_path_buf(),
                line,
                found: row.len(),
            });
        }
        records.push(RawRecord::new(&row[0], &row[1], &row[2]));
    }
    Ok(records)
}

/// Decodes file bytes, honoring a byte-order mark.
///
/// Text without a BOM is read as UTF-8; if it is not valid UTF-8 it is
/// decoded as Windows-1252, the legacy encoding of the export server.
pub fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> (Cow<'a, str>, &'static str) {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let body = &bytes[bom_len..];

    if encoding == UTF_8 {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(body) {
            return (text, UTF_8.name());
        }
        warn!(
            path = %path.display(),
            "source is not valid UTF-8, decoding as Windows-1252"
        );
        let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
        return (text, WINDOWS_1252.name());
    }

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "source contains malformed sequences; replaced"
        );
    }
    (text, encoding.name())
}

fn file_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}
