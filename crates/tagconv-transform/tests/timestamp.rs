//! Property tests for the timestamp codec.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use tagconv_transform::{
    apply_offset, format_canonical, parse_canonical, parse_source_timestamp,
};

fn instant_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (1900i32..2200, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(year, month, day, hour, minute, second)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, second)
                .unwrap()
        },
    )
}

/// Renders an instant the way the acquisition server exports it.
fn to_source_text(instant: NaiveDateTime, fraction: Option<u32>) -> String {
    let base = instant.format("%-m/%-d/%Y %-I:%M:%S %p").to_string();
    match fraction {
        Some(digits) => format!("{base}.{digits:07}"),
        None => base,
    }
}

proptest! {
    #[test]
    fn canonical_round_trip(instant in instant_strategy()) {
        prop_assert_eq!(parse_canonical(&format_canonical(instant)), Some(instant));
    }

    #[test]
    fn source_text_parses_to_same_instant(
        instant in instant_strategy(),
        fraction in proptest::option::of(0u32..10_000_000),
    ) {
        let text = to_source_text(instant, fraction);
        prop_assert_eq!(parse_source_timestamp(&text), Ok(instant));
    }

    #[test]
    fn offset_is_reversible(instant in instant_strategy(), hours in -168i32..=168) {
        prop_assert_eq!(apply_offset(apply_offset(instant, hours), -hours), instant);
    }
}

#[test]
fn fraction_is_discarded() {
    assert_eq!(
        parse_source_timestamp("11/25/2025 2:02:03 PM.2390000"),
        parse_source_timestamp("11/25/2025 2:02:03 PM")
    );
}
