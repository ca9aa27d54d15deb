use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, info_span};

use tagconv_cli::pipeline::{Upload, apply, download, upload};
use tagconv_cli::settings::{build_settings, resolve_tag};
use tagconv_model::{ConversionResult, PipelineSettings};
use tagconv_transform::convert_timestamp;

use crate::cli::{ConvertArgs, PreviewArgs, SettingsArgs, TimestampArgs};
use crate::summary::{print_counts, print_preview, saved_line, status_line};

/// Source records, settings, and the conversion they produced.
struct Session {
    upload: Upload,
    settings: PipelineSettings,
    result: ConversionResult,
}

fn run_session(inputs: &[PathBuf], args: &SettingsArgs) -> Result<Session> {
    let settings = build_settings(args.settings_file.as_deref(), &args.overrides())?;
    let upload = upload(inputs)?;
    let settings = resolve_tag(settings, upload.default_tag_name.as_deref());
    let result = apply(&upload.source, &settings)?;
    Ok(Session {
        upload,
        settings,
        result,
    })
}

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let span = info_span!("convert", output = %args.output.display());
    let _guard = span.enter();

    let Session {
        upload,
        settings,
        result,
    } = run_session(&args.inputs, &args.settings)?;
    println!("{}", status_line(&upload, &result, settings.hour_offset));
    print_counts(&upload, &result);

    if args.dry_run {
        info!(rows = result.len(), "dry run, output not written");
        return Ok(());
    }
    let summary = download(&result.records, &args.output, &args.write_options())?;
    println!("{}", saved_line(&summary));
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let Session {
        upload,
        settings,
        result,
    } = run_session(&args.inputs, &args.settings)?;
    println!("{}", status_line(&upload, &result, settings.hour_offset));
    print_preview(upload.source.records(), &result.records, args.rows);
    Ok(())
}

pub fn run_timestamp(args: &TimestampArgs) -> Result<()> {
    for raw in &args.values {
        println!("{raw} -> {}", convert_timestamp(raw, args.offset));
    }
    Ok(())
}
