//! Serialization of output records to delimited bytes.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tagconv_model::OutputRecord;
use tracing::{debug, info};

use crate::error::{OutputError, Result};
use crate::types::{OutputEncoding, WriteOptions, WriteSummary};

/// Renders records as headerless delimited text in the chosen encoding.
///
/// Columns are `[tagname,]timestamp,value`; fields are quoted only when
/// they contain a delimiter, quote, or line break.
///
/// # Errors
///
/// Returns [`OutputError::Unencodable`] naming the first row with a
/// character the encoding cannot represent.
pub fn serialize(records: &[OutputRecord], options: &WriteOptions) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(options.line_ending.terminator())
        .from_writer(Vec::new());
    for record in records {
        writer.write_record(record.fields())?;
    }
    let utf8 = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;

    match options.encoding {
        OutputEncoding::Utf8 => Ok(utf8),
        OutputEncoding::Windows1252 => {
            let text = String::from_utf8_lossy(&utf8);
            let encoding = options.encoding.encoding();
            let (bytes, _, had_errors) = encoding.encode(&text);
            if had_errors {
                return Err(first_unencodable(records, options.encoding));
            }
            Ok(bytes.into_owned())
        }
    }
}

/// Serializes records and writes them to `path`.
///
/// The bytes are written to a temporary sibling file that is renamed over
/// the target once complete, so a failed write leaves no partial file.
pub fn write_output(
    records: &[OutputRecord],
    path: &Path,
    options: &WriteOptions,
) -> Result<WriteSummary> {
    let bytes = serialize(records, options)?;
    let staging = staging_path(path);

    fs::write(&staging, &bytes).map_err(|source| {
        let _ = fs::remove_file(&staging);
        OutputError::FileWrite {
            path: staging.clone(),
            source,
        }
    })?;
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        OutputError::FileWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        path = %path.display(),
        rows = records.len(),
        bytes = bytes.len(),
        encoding = %options.encoding,
        "output written"
    );
    Ok(WriteSummary {
        path: path.to_path_buf(),
        rows: records.len(),
        bytes: bytes.len(),
        encoding: options.encoding,
    })
}

/// Hidden temporary file next to the target.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".partial");
    path.with_file_name(name)
}

/// Locates the first row and character the encoding cannot represent.
fn first_unencodable(records: &[OutputRecord], target: OutputEncoding) -> OutputError {
    let encoding = target.encoding();
    let mut buffer = [0u8; 4];
    for (index, record) in records.iter().enumerate() {
        for field in record.fields() {
            for character in field.chars() {
                let (_, _, had_errors) = encoding.encode(character.encode_utf8(&mut buffer));
                if had_errors {
                    debug!(row = index + 1, %character, "unencodable character");
                    return OutputError::Unencodable {
                        row: index + 1,
                        character,
                        encoding: target.name(),
                    };
                }
            }
        }
    }
    OutputError::Unencodable {
        row: 0,
        character: char::REPLACEMENT_CHARACTER,
        encoding: target.name(),
    }
}
