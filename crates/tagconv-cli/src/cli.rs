//! CLI argument definitions for the tag record converter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tagconv_cli::settings::SettingsOverrides;
use tagconv_model::TagMode;
use tagconv_output::{LineEnding, OutputEncoding, WriteOptions};
use tagconv_transform::parse_hour_offset;

#[derive(Parser)]
#[command(
    name = "tagconv",
    version,
    about = "Convert historian tag exports to canonical timestamps",
    long_about = "Convert headerless tag exports (timestamp,value,quality) with US-locale\n\
                  timestamps into DD-Mon-YYYY HH:MM:SS rows.\n\n\
                  Supports hour offsets, quality and time-range filtering,\n\
                  duplicate suppression, and an optional tag name column."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert source files and write the result.
    Convert(ConvertArgs),

    /// Show original and converted rows without writing anything.
    Preview(PreviewArgs),

    /// Convert individual timestamps.
    Timestamp(TimestampArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Source files; records from all files are merged by timestamp.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Destination file.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Text encoding of the written file.
    #[arg(long = "encoding", value_enum, default_value = "utf8")]
    pub encoding: EncodingArg,

    #[arg(long = "line-ending", value_enum, default_value = "lf")]
    pub line_ending: LineEndingArg,

    /// Convert and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl ConvertArgs {
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions::default()
            .with_encoding(self.encoding.into())
            .with_line_ending(self.line_ending.into())
    }
}

#[derive(Parser)]
pub struct PreviewArgs {
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Number of rows to show from each table.
    #[arg(long = "rows", value_name = "N", default_value_t = 20)]
    pub rows: usize,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Parser)]
pub struct TimestampArgs {
    /// Source timestamps, e.g. "11/25/2025 2:02:03 PM.2390000".
    #[arg(value_name = "RAW", required = true)]
    pub values: Vec<String>,

    /// Hours added to each timestamp.
    #[arg(
        long = "offset",
        value_name = "HOURS",
        default_value = "0",
        allow_negative_numbers = true,
        value_parser = parse_offset_arg
    )]
    pub offset: i32,
}

/// Conversion settings shared by `convert` and `preview`.
#[derive(Args)]
pub struct SettingsArgs {
    /// JSON settings file; flags below override its values.
    #[arg(long = "settings", value_name = "FILE")]
    pub settings_file: Option<PathBuf>,

    /// Hours added to every parsed timestamp (e.g. -5, 0, +3).
    #[arg(
        long = "offset",
        value_name = "HOURS",
        allow_negative_numbers = true,
        value_parser = parse_offset_arg
    )]
    pub offset: Option<i32>,

    /// Where the tag name column comes from.
    #[arg(long = "tag-mode", value_enum)]
    pub tag_mode: Option<TagModeArg>,

    /// Tag name text for custom mode.
    #[arg(long = "tag", value_name = "NAME")]
    pub tag: Option<String>,

    /// Drop records with the bad quality code 0x100400c0.
    #[arg(long = "remove-bad-quality")]
    pub remove_bad_quality: bool,

    /// Keep only the first record for each converted timestamp.
    #[arg(long = "remove-duplicates")]
    pub remove_duplicates: bool,

    /// Keep records at or after this date (DD-Mon-YYYY or YYYY-MM-DD).
    #[arg(long = "start-date", value_name = "DATE")]
    pub start_date: Option<String>,

    /// Time of day for --start-date (HH:MM:SS, default 00:00:00).
    #[arg(long = "start-time", value_name = "TIME")]
    pub start_time: Option<String>,

    /// Keep records at or before this date (DD-Mon-YYYY or YYYY-MM-DD).
    #[arg(long = "end-date", value_name = "DATE")]
    pub end_date: Option<String>,

    /// Time of day for --end-date (HH:MM:SS, default 23:59:59).
    #[arg(long = "end-time", value_name = "TIME")]
    pub end_time: Option<String>,
}

impl SettingsArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            hour_offset: self.offset,
            tag_mode: self.tag_mode.map(Into::into),
            tag_value: self.tag.clone(),
            remove_bad_quality: self.remove_bad_quality,
            remove_duplicates: self.remove_duplicates,
            start_date: self.start_date.clone(),
            start_time: self.start_time.clone(),
            end_date: self.end_date.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

fn parse_offset_arg(value: &str) -> Result<i32, String> {
    parse_hour_offset(value).map_err(|error| format!("{error}"))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    Utf8,
    #[value(name = "windows-1252")]
    Windows1252,
}

impl From<EncodingArg> for OutputEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Utf8 => Self::Utf8,
            EncodingArg::Windows1252 => Self::Windows1252,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LineEndingArg {
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(value: LineEndingArg) -> Self {
        match value {
            LineEndingArg::Lf => Self::Lf,
            LineEndingArg::Crlf => Self::CrLf,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TagModeArg {
    None,
    Filename,
    Custom,
}

impl From<TagModeArg> for TagMode {
    fn from(value: TagModeArg) -> Self {
        match value {
            TagModeArg::None => Self::None,
            TagModeArg::Filename => Self::Filename,
            TagModeArg::Custom => Self::Custom,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
