//! Run settings: JSON settings file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tagconv_model::{PipelineSettings, RangeBound, TagMode};
use tracing::debug;

/// Values given on the command line; `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub hour_offset: Option<i32>,
    pub tag_mode: Option<TagMode>,
    pub tag_value: Option<String>,
    pub remove_bad_quality: bool,
    pub remove_duplicates: bool,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
}

/// Load pipeline settings from a JSON file.
///
/// Missing fields take their defaults.
pub fn load_settings_file(path: &Path) -> Result<PipelineSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: PipelineSettings = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
    debug!(path = %path.display(), "settings file loaded");
    Ok(settings)
}

/// Layer command-line overrides on top of base settings.
///
/// Switches only turn filters on; a switch left off keeps the base value.
pub fn apply_overrides(
    mut settings: PipelineSettings,
    overrides: &SettingsOverrides,
) -> PipelineSettings {
    if let Some(hours) = overrides.hour_offset {
        settings.hour_offset = hours;
    }
    if let Some(mode) = overrides.tag_mode {
        settings.tag_mode = mode;
    }
    if let Some(value) = &overrides.tag_value {
        settings.tag_value = Some(value.clone());
        if overrides.tag_mode.is_none() && settings.tag_mode == TagMode::None {
            settings.tag_mode = TagMode::Custom;
        }
    }
    settings.remove_bad_quality |= overrides.remove_bad_quality;
    settings.remove_duplicates |= overrides.remove_duplicates;

    override_bound(
        &mut settings.start_filter,
        overrides.start_date.as_deref(),
        overrides.start_time.as_deref(),
    );
    override_bound(
        &mut settings.end_filter,
        overrides.end_date.as_deref(),
        overrides.end_time.as_deref(),
    );
    settings
}

fn override_bound(slot: &mut Option<RangeBound>, date: Option<&str>, time: Option<&str>) {
    if let Some(date) = date {
        *slot = Some(RangeBound::on(date, time));
    } else if let (Some(bound), Some(time)) = (slot.as_mut(), time) {
        bound.time = Some(time.to_string());
    }
}

/// Fill the tag text from the first input file where the mode needs it.
///
/// `Filename` always takes the file's base name. `Custom` only takes it when
/// no tag text was given.
pub fn resolve_tag(
    mut settings: PipelineSettings,
    default_tag_name: Option<&str>,
) -> PipelineSettings {
    let blank = settings
        .tag_value
        .as_deref()
        .is_none_or(|value| value.trim().is_empty());
    match settings.tag_mode {
        TagMode::None => {}
        TagMode::Filename => settings.tag_value = default_tag_name.map(str::to_string),
        TagMode::Custom if blank => settings.tag_value = default_tag_name.map(str::to_string),
        TagMode::Custom => {}
    }
    settings
}

/// Build the settings for a run from an optional file and overrides.
pub fn build_settings(
    file: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<PipelineSettings> {
    let base = match file {
        Some(path) => load_settings_file(path)?,
        None => PipelineSettings::default(),
    };
    Ok(apply_overrides(base, overrides))
}
