//! Settings for a single conversion run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the optional tag name column is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    /// No tag name column.
    #[default]
    None,
    /// Use the base name of the first input file.
    Filename,
    /// Use a user-supplied tag name.
    Custom,
}

impl TagMode {
    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Filename => "Filename",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One side of the time-range filter, as entered by the user.
///
/// The date is required when the bound is enabled. The time is optional;
/// when it is missing or does not parse, the bound falls back to the start
/// or end of the day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeBound {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl RangeBound {
    /// Create an enabled bound for the given date and optional time.
    pub fn on(date: impl Into<String>, time: Option<&str>) -> Self {
        Self {
            enabled: true,
            date: date.into(),
            time: time.map(str::to_string),
        }
    }
}

/// Options controlling one conversion run.
///
/// Settings are supplied in full on every run; nothing is carried over
/// between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Flat shift in hours applied to every parsed timestamp.
    #[serde(default)]
    pub hour_offset: i32,

    #[serde(default)]
    pub tag_mode: TagMode,

    /// Tag text used by [`TagMode::Filename`] and [`TagMode::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_value: Option<String>,

    /// Drop records carrying the bad-quality code.
    #[serde(default)]
    pub remove_bad_quality: bool,

    /// Keep only the first record for each output timestamp.
    #[serde(default)]
    pub remove_duplicates: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_filter: Option<RangeBound>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_filter: Option<RangeBound>,
}

impl PipelineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hour_offset(mut self, hours: i32) -> Self {
        self.hour_offset = hours;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, mode: TagMode, value: Option<&str>) -> Self {
        self.tag_mode = mode;
        self.tag_value = value.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_remove_bad_quality(mut self, enable: bool) -> Self {
        self.remove_bad_quality = enable;
        self
    }

    #[must_use]
    pub fn with_remove_duplicates(mut self, enable: bool) -> Self {
        self.remove_duplicates = enable;
        self
    }

    #[must_use]
    pub fn with_start_filter(mut self, bound: RangeBound) -> Self {
        self.start_filter = Some(bound);
        self
    }

    #[must_use]
    pub fn with_end_filter(mut self, bound: RangeBound) -> Self {
        self.end_filter = Some(bound);
        self
    }

    /// The tag name to inject, if the tag column is active for this run.
    pub fn tag_name(&self) -> Option<&str> {
        if self.tag_mode == TagMode::None {
            return None;
        }
        self.tag_value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Enabled start bound, if any.
    pub fn active_start(&self) -> Option<&RangeBound> {
        self.start_filter.as_ref().filter(|bound| bound.enabled)
    }

    /// Enabled end bound, if any.
    pub fn active_end(&self) -> Option<&RangeBound> {
        self.end_filter.as_ref().filter(|bound| bound.enabled)
    }

    /// Returns true if either side of the range filter is enabled.
    pub fn range_filter_active(&self) -> bool {
        self.active_start().is_some() || self.active_end().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_requires_mode_and_text() {
        let none = PipelineSettings::new().with_tag(TagMode::None, Some("FIC101"));
        assert_eq!(none.tag_name(), None);

        let blank = PipelineSettings::new().with_tag(TagMode::Custom, Some("   "));
        assert_eq!(blank.tag_name(), None);

        let custom = PipelineSettings::new().with_tag(TagMode::Custom, Some(" FIC101 "));
        assert_eq!(custom.tag_name(), Some("FIC101"));

        let filename = PipelineSettings::new().with_tag(TagMode::Filename, Some("export"));
        assert_eq!(filename.tag_name(), Some("export"));
    }

    #[test]
    fn disabled_bounds_are_inactive() {
        let settings = PipelineSettings::new().with_start_filter(RangeBound {
            enabled: false,
            date: "01-Jan-2025".to_string(),
            time: None,
        });
        assert!(settings.active_start().is_none());
        assert!(!settings.range_filter_active());

        let settings = settings.with_end_filter(RangeBound::on("02-Jan-2025", None));
        assert!(settings.range_filter_active());
    }
}
