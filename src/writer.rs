//! Main header re-serialisation
//!
//! Regenerates a tag-`1` Nordic line from a typed [`MainHeader`]. Numbers are
//! right-aligned and text left-aligned in their columns; absent values stay
//! blank. Values too wide for their column lose decimals before they are
//! dropped.

use std::ops::Range;
use tracing::warn;

use crate::constants::{RECORD_WIDTH, TAG_COLUMN, main_columns, tags};
use crate::models::{Magnitude, MainHeader};

/// Fixed-width line under construction
struct LineBuffer {
    columns: Vec<char>,
}

impl LineBuffer {
    fn new(tag: char) -> Self {
        let mut columns = vec![' '; RECORD_WIDTH];
        columns[TAG_COLUMN] = tag;
        Self { columns }
    }

    fn put(&mut self, range: Range<usize>, text: &str, right_align: bool) {
        let width = range.len();
        let length = text.chars().count();
        if length > width {
            warn!("{:?} does not fit in {} columns, left blank", text, width);
            return;
        }
        let start = if right_align {
            range.start + width - length
        } else {
            range.start
        };
        for (offset, c) in text.chars().enumerate() {
            self.columns[start + offset] = c;
        }
    }

    fn text(&mut self, range: Range<usize>, value: Option<&str>) {
        if let Some(value) = value {
            self.put(range, value, false);
        }
    }

    fn code(&mut self, range: Range<usize>, value: Option<char>) {
        if let Some(value) = value {
            self.put(range, &value.to_string(), false);
        }
    }

    fn integer(&mut self, range: Range<usize>, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.put(range, &value.to_string(), true);
        }
    }

    fn float(&mut self, range: Range<usize>, value: Option<f64>, decimals: usize) {
        let Some(value) = value else {
            return;
        };
        let width = range.len();
        let text = (0..=decimals)
            .rev()
            .map(|precision| format!("{:.*}", precision, value))
            .find(|text| text.len() <= width)
            .unwrap_or_else(|| format!("{:.*}", decimals, value));
        self.put(range, &text, true);
    }

    fn finish(self) -> String {
        self.columns.into_iter().collect()
    }
}

fn magnitude(
    buffer: &mut LineBuffer,
    magnitude: &Magnitude,
    columns: (Range<usize>, Range<usize>, Range<usize>),
) {
    if magnitude.is_empty() {
        return;
    }
    let (value, magnitude_type, agency) = columns;
    buffer.float(value, magnitude.value, 1);
    buffer.code(magnitude_type, magnitude.magnitude_type);
    buffer.text(agency, magnitude.reporting_agency.as_deref());
}

/// Format a main header as an 80-column Nordic line
pub fn format_main_header(main: &MainHeader) -> String {
    let mut buffer = LineBuffer::new(tags::MAIN);

    if let Some(date) = main.origin_date {
        buffer.put(
            main_columns::ORIGIN_DATE,
            &date.format("%Y %m%d").to_string(),
            false,
        );
    }
    if let Some(hour) = main.origin_hour {
        buffer.put(main_columns::ORIGIN_HOUR, &format!("{:02}", hour), true);
    }
    if let Some(minute) = main.origin_minute {
        buffer.put(main_columns::ORIGIN_MINUTE, &format!("{:02}", minute), true);
    }
    buffer.float(main_columns::ORIGIN_SECOND, main.origin_second, 1);
    buffer.code(main_columns::LOCATION_MODEL, main.location_model);
    buffer.code(main_columns::DISTANCE_INDICATOR, main.distance_indicator);
    buffer.code(main_columns::EVENT_DESC_ID, main.event_desc_id);
    buffer.float(main_columns::EPICENTER_LATITUDE, main.epicenter_latitude, 3);
    buffer.float(main_columns::EPICENTER_LONGITUDE, main.epicenter_longitude, 3);
    buffer.float(main_columns::DEPTH, main.depth, 1);
    buffer.code(main_columns::DEPTH_CONTROL, main.depth_control);
    buffer.code(main_columns::LOCATING_INDICATOR, main.locating_indicator);
    buffer.text(
        main_columns::EPICENTER_REPORTING_AGENCY,
        main.epicenter_reporting_agency.as_deref(),
    );
    buffer.integer(main_columns::STATIONS_USED, main.stations_used);
    buffer.float(main_columns::RMS_TIME_RESIDUALS, main.rms_time_residuals, 1);

    let [first, second, third] = &main.magnitudes;
    magnitude(
        &mut buffer,
        first,
        (
            main_columns::MAGNITUDE_1,
            main_columns::TYPE_OF_MAGNITUDE_1,
            main_columns::MAGNITUDE_REPORTING_AGENCY_1,
        ),
    );
    magnitude(
        &mut buffer,
        second,
        (
            main_columns::MAGNITUDE_2,
            main_columns::TYPE_OF_MAGNITUDE_2,
            main_columns::MAGNITUDE_REPORTING_AGENCY_2,
        ),
    );
    magnitude(
        &mut buffer,
        third,
        (
            main_columns::MAGNITUDE_3,
            main_columns::TYPE_OF_MAGNITUDE_3,
            main_columns::MAGNITUDE_REPORTING_AGENCY_3,
        ),
    );

    buffer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordKind;
    use crate::parser::classifier::classify;
    use crate::parser::convert;
    use crate::parser::extractor::RawMain;

    fn parse(line: &str) -> MainHeader {
        convert::main_header(&RawMain::extract(line).unwrap(), line).unwrap()
    }

    #[test]
    fn test_round_trip_keeps_significant_fields() {
        let source = format!(
            "{:<79}1",
            " 2019 0502 1305 12.3L   60.170  24.940 10.0  HEL 12 0.5 3.4LHEL 2.9WBER 1.2CUPP"
        );
        let parsed = parse(&source);
        let written = format_main_header(&parsed);

        assert_eq!(written.chars().count(), RECORD_WIDTH);
        assert_eq!(classify(&written).unwrap(), RecordKind::Main);

        let reparsed = parse(&written);
        assert_eq!(reparsed.origin_date, parsed.origin_date);
        assert_eq!(reparsed.origin_time(), parsed.origin_time());
        assert_eq!(reparsed.epicenter_latitude, parsed.epicenter_latitude);
        assert_eq!(reparsed.epicenter_longitude, parsed.epicenter_longitude);
        assert_eq!(reparsed.depth, parsed.depth);
        assert_eq!(reparsed.magnitudes, parsed.magnitudes);
        assert_eq!(reparsed.magnitudes[2].value, Some(1.2));
        // Whitespace aside, the regenerated line matches its source
        assert_eq!(written, source);
    }

    #[test]
    fn test_absent_fields_stay_blank() {
        let written = format_main_header(&MainHeader::default());
        assert_eq!(written, format!("{:<79}1", ""));
    }

    #[test]
    fn test_wide_values_lose_decimals() {
        let main = MainHeader {
            depth: Some(123.46),
            epicenter_longitude: Some(-179.9999),
            ..Default::default()
        };
        let written = format_main_header(&main);
        assert_eq!(&written[38..43], "123.5");
        assert_eq!(&written[30..38], "-180.000");
    }
}
