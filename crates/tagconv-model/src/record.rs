//! Input and output record types.

/// Quality code the data-acquisition server writes for bad values.
pub const BAD_QUALITY_CODE: &str = "0x100400c0";

/// One line of a source export, kept verbatim.
///
/// Fields are positional in the export: timestamp, value, quality.
/// The value is never validated as numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub raw_timestamp: String,
    pub value: String,
    pub quality: String,
}

impl RawRecord {
    pub fn new(
        raw_timestamp: impl Into<String>,
        value: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            raw_timestamp: raw_timestamp.into(),
            value: value.into(),
            quality: quality.into(),
        }
    }

    /// Returns true if the trimmed quality code marks a bad value.
    pub fn has_bad_quality(&self) -> bool {
        self.quality.trim() == BAD_QUALITY_CODE
    }
}

/// One converted row, ready for serialization.
///
/// `tagname` is either set on every row of a run or on none of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub tagname: Option<String>,
    /// Canonical timestamp, or the original raw text when it did not parse.
    pub timestamp: String,
    pub value: String,
}

impl OutputRecord {
    /// Fields in output column order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(3);
        if let Some(tag) = &self.tagname {
            fields.push(tag.as_str());
        }
        fields.push(self.timestamp.as_str());
        fields.push(self.value.as_str());
        fields
    }
}
