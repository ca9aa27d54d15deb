//! Error types for output serialization and writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort serialization or writing. No partial file is left.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A character cannot be represented in the chosen encoding.
    #[error("row {row}: character {character:?} cannot be encoded as {encoding}")]
    Unencodable {
        row: usize,
        character: char,
        encoding: &'static str,
    },

    /// The delimited writer failed.
    #[error("failed to write delimited output: {0}")]
    Csv(#[from] csv::Error),

    /// In-memory buffer error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write the target file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OutputError::Unencodable {
            row: 2,
            character: '\u{2603}',
            encoding: "windows-1252",
        };
        assert_eq!(
            err.to_string(),
            "row 2: character '\u{2603}' cannot be encoded as windows-1252"
        );
    }
}
