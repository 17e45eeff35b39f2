//! Test utilities for Nordic parser testing
//!
//! Builders for fixed-width record lines, so tests state fields by column
//! table entry instead of counting blanks by hand.

use std::ops::Range;

use crate::constants::{RECORD_WIDTH, TAG_COLUMN, main_columns, phase_columns, tags};

mod convert_tests;

/// Build an 80-column line with the given fields and tag
///
/// Each text starts at the first column of its range and must fit in it.
pub fn record(tag: char, fields: &[(Range<usize>, &str)]) -> String {
    let mut columns = vec![' '; RECORD_WIDTH];
    for (range, text) in fields {
        assert!(
            text.chars().count() <= range.len(),
            "{:?} does not fit in {:?}",
            text,
            range
        );
        for (offset, c) in text.chars().enumerate() {
            columns[range.start + offset] = c;
        }
    }
    columns[TAG_COLUMN] = tag;
    columns.into_iter().collect()
}

/// Main header of 2019-05-02 13:05:12.3, magnitude 3.4 L
pub fn sample_main() -> String {
    main_with(&[])
}

/// Main header like [`sample_main`], with some fields replaced
pub fn main_with(overrides: &[(Range<usize>, &str)]) -> String {
    let mut fields = vec![
        (main_columns::ORIGIN_DATE, "2019 0502"),
        (main_columns::ORIGIN_HOUR, "13"),
        (main_columns::ORIGIN_MINUTE, "05"),
        (main_columns::ORIGIN_SECOND, "12.3"),
        (main_columns::LOCATION_MODEL, "L"),
        (main_columns::EPICENTER_LATITUDE, " 60.170"),
        (main_columns::EPICENTER_LONGITUDE, "  24.940"),
        (main_columns::DEPTH, " 10.0"),
        (main_columns::EPICENTER_REPORTING_AGENCY, "HEL"),
        (main_columns::STATIONS_USED, " 12"),
        (main_columns::RMS_TIME_RESIDUALS, " 0.5"),
        (main_columns::MAGNITUDE_1, "3.4"),
        (main_columns::TYPE_OF_MAGNITUDE_1, "L"),
        (main_columns::MAGNITUDE_REPORTING_AGENCY_1, "HEL"),
    ];
    for (range, text) in overrides {
        fields.retain(|(existing, _)| existing != range);
        fields.push((range.clone(), *text));
    }
    record(tags::MAIN, &fields)
}

/// Phase line for a station with a day offset indicator and "HHMM SS.ss" time
pub fn phase_line(station: &str, time_info: &str, time: &str) -> String {
    record(
        tags::BLANK,
        &[
            (phase_columns::STATION_CODE, station),
            (phase_columns::SP_INSTRUMENT_TYPE, "S"),
            (phase_columns::SP_COMPONENT, "Z"),
            (phase_columns::QUALITY_INDICATOR, "I"),
            (phase_columns::PHASE_TYPE, "P"),
            (phase_columns::TIME_INFO, time_info),
            (phase_columns::OBSERVATION_TIME, time),
        ],
    )
}

/// Error header line bound to the preceding main header
pub fn error_line(gap: &str, depth_error: &str) -> String {
    use crate::constants::error_columns;
    record(
        tags::ERROR,
        &[
            (error_columns::GAP, gap),
            (error_columns::SECOND_ERROR, "0.4"),
            (error_columns::EPICENTER_LATITUDE_ERROR, "2.1"),
            (error_columns::EPICENTER_LONGITUDE_ERROR, "3.5"),
            (error_columns::DEPTH_ERROR, depth_error),
        ],
    )
}

pub fn comment_line(text: &str) -> String {
    record(
        tags::COMMENT,
        &[(crate::constants::comment_columns::COMMENT, text)],
    )
}
