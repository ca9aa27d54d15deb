//! Integration tests for the upload, apply, and download stages.

use std::fs;
use std::path::PathBuf;

use tagconv_cli::pipeline::{apply, download, upload};
use tagconv_cli::settings::{
    SettingsOverrides, apply_overrides, build_settings, load_settings_file, resolve_tag,
};
use tagconv_model::{PipelineSettings, RangeBound, TagMode};
use tagconv_output::{LineEnding, OutputEncoding, WriteOptions};
use tempfile::TempDir;

const FIC101: &str = "\
11/25/2025 2:02:03 PM.2390000,651.261902,0x400c0
11/25/2025 2:02:04 PM.1000000,652.1,0x100400c0
11/25/2025 2:02:04 PM.5000000,652.2,0x400c0
Bad Timestamp,0,0x400c0
11/25/2025 11:59:59 PM,700,0x400c0
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn default_settings_convert_every_row() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "FIC101.csv", FIC101);

    let upload = upload(&[input]).unwrap();
    assert_eq!(upload.row_count(), 5);
    assert_eq!(upload.label(), "FIC101.csv");

    let result = apply(&upload.source, &PipelineSettings::default()).unwrap();
    let timestamps: Vec<&str> = result
        .records
        .iter()
        .map(|record| record.timestamp.as_str())
        .collect();
    assert_eq!(
        timestamps,
        vec![
            "Bad Timestamp",
            "25-Nov-2025 14:02:03",
            "25-Nov-2025 14:02:04",
            "25-Nov-2025 14:02:04",
            "25-Nov-2025 23:59:59",
        ]
    );
    assert!(!result.has_tag_column());
}

#[test]
fn full_session_writes_filtered_tagged_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "FIC101.csv", FIC101);
    let target = dir.path().join("converted.csv");

    let upload = upload(&[input]).unwrap();
    let settings = PipelineSettings::new()
        .with_hour_offset(5)
        .with_tag(TagMode::Filename, None)
        .with_remove_bad_quality(true)
        .with_remove_duplicates(true)
        .with_end_filter(RangeBound::on("2025-11-26", Some("00:00:00")));
    let settings = resolve_tag(settings, upload.default_tag_name.as_deref());
    let result = apply(&upload.source, &settings).unwrap();

    assert_eq!(result.counts.bad_quality_removed, 1);
    assert_eq!(result.counts.range_filtered, 2);
    assert_eq!(result.counts.duplicates_removed, 0);

    let options = WriteOptions::default().with_line_ending(LineEnding::CrLf);
    let summary = download(&result.records, &target, &options).unwrap();
    assert_eq!(summary.rows, 2);
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "FIC101,25-Nov-2025 19:02:03,651.261902\r\nFIC101,25-Nov-2025 19:02:04,652.2\r\n"
    );
}

#[test]
fn reapplying_settings_reuses_uploaded_records() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "FIC101.csv", FIC101);
    let upload = upload(&[input]).unwrap();

    let deduped = apply(
        &upload.source,
        &PipelineSettings::new().with_remove_duplicates(true),
    )
    .unwrap();
    assert_eq!(deduped.len(), 4);

    let plain = apply(&upload.source, &PipelineSettings::default()).unwrap();
    assert_eq!(plain.len(), 5);
    assert_eq!(upload.row_count(), 5);
}

#[test]
fn invalid_bound_is_reported_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "FIC101.csv", FIC101);
    let upload = upload(&[input]).unwrap();

    let settings = PipelineSettings::new().with_start_filter(RangeBound::on("yesterday", None));
    let err = apply(&upload.source, &settings).unwrap_err();
    assert!(format!("{err:#}").contains("invalid start date 'yesterday'"));
}

#[test]
fn missing_input_fails_upload() {
    let dir = TempDir::new().unwrap();
    let err = upload(&[dir.path().join("absent.csv")]).unwrap_err();
    assert!(format!("{err:#}").starts_with("read source files"));
}

#[test]
fn unencodable_download_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "TI200.csv", "1/1/2025 12:00:00 AM,\u{2603},0x400c0\n");
    let target = dir.path().join("out.csv");

    let upload = upload(&[input]).unwrap();
    let result = apply(&upload.source, &PipelineSettings::default()).unwrap();
    let options = WriteOptions::default().with_encoding(OutputEncoding::Windows1252);

    assert!(download(&result.records, &target, &options).is_err());
    assert!(!target.exists());
}

#[test]
fn settings_file_with_overrides() {
    let dir = TempDir::new().unwrap();
    let settings_path = write(
        &dir,
        "settings.json",
        r#"{
            "hour_offset": 3,
            "tag_mode": "custom",
            "remove_bad_quality": true,
            "start_filter": { "enabled": true, "date": "25-Nov-2025" }
        }"#,
    );

    let loaded = load_settings_file(&settings_path).unwrap();
    assert_eq!(loaded.hour_offset, 3);
    assert_eq!(loaded.tag_mode, TagMode::Custom);
    assert!(loaded.remove_bad_quality);
    assert_eq!(
        loaded.start_filter,
        Some(RangeBound::on("25-Nov-2025", None))
    );

    let overrides = SettingsOverrides {
        hour_offset: Some(-2),
        ..SettingsOverrides::default()
    };
    let settings = build_settings(Some(&settings_path), &overrides).unwrap();
    assert_eq!(settings.hour_offset, -2);
    assert_eq!(settings, apply_overrides(loaded, &overrides));

    let resolved = resolve_tag(settings, Some("FIC101"));
    assert_eq!(resolved.tag_name(), Some("FIC101"));
}

#[test]
fn malformed_settings_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let settings_path = write(&dir, "settings.json", "{ \"hour_offset\": \"five\" }");
    let err = build_settings(Some(&settings_path), &SettingsOverrides::default()).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse settings"));
}
