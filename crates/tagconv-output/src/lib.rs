//! Output writer for converted tag records.
//!
//! Renders [`OutputRecord`](tagconv_model::OutputRecord) rows as headerless
//! comma-delimited text in UTF-8 or Windows-1252 and writes them to disk
//! without leaving partial files behind.

pub mod error;
pub mod types;
pub mod writer;

pub use error::{OutputError, Result};
pub use types::{LineEnding, OutputEncoding, WriteOptions, WriteSummary};
pub use writer::{serialize, write_output};
