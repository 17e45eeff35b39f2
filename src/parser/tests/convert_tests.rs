//! Tests for per-record typed conversion

use chrono::NaiveDate;

use super::*;
use crate::constants::macroseismic_columns;
use crate::error::NordicError;
use crate::models::{DayOffset, RecordKind};
use crate::parser::convert;
use crate::parser::extractor::{RawError, RawMacroseismic, RawMain, RawPhase};

#[test]
fn test_main_header_conversion() {
    let line = sample_main();
    let main = convert::main_header(&RawMain::extract(&line).unwrap(), &line).unwrap();

    assert_eq!(main.origin_date, NaiveDate::from_ymd_opt(2019, 5, 2));
    assert_eq!(main.origin_hour, Some(13));
    assert_eq!(main.origin_minute, Some(5));
    assert_eq!(main.origin_second, Some(12.3));
    assert_eq!(main.location_model, Some('L'));
    assert_eq!(main.epicenter_latitude, Some(60.17));
    assert_eq!(main.epicenter_longitude, Some(24.94));
    assert_eq!(main.depth, Some(10.0));
    assert_eq!(main.depth_control, None);
    assert_eq!(main.epicenter_reporting_agency.as_deref(), Some("HEL"));
    assert_eq!(main.stations_used, Some(12));
    assert_eq!(main.rms_time_residuals, Some(0.5));
    assert_eq!(main.magnitudes[0].value, Some(3.4));
    assert_eq!(main.magnitudes[0].magnitude_type, Some('L'));
    assert!(main.magnitudes[1].is_empty());
    assert!(main.error_header.is_none());
    assert_eq!(main.raw_line, line);
}

#[test]
fn test_main_header_rejects_bad_codes() {
    let line = main_with(&[(main_columns::EVENT_DESC_ID, "Z")]);
    let error = convert::main_header(&RawMain::extract(&line).unwrap(), &line).unwrap_err();
    assert_eq!(error.category(), "EnumError");

    let line = main_with(&[(main_columns::EPICENTER_LATITUDE, " 91.000")]);
    match convert::main_header(&RawMain::extract(&line).unwrap(), &line) {
        Err(NordicError::Range { kind, field, .. }) => {
            assert_eq!(kind, RecordKind::Main);
            assert_eq!(field, "epicenter_latitude");
        }
        other => panic!("Expected RangeError, got {:?}", other),
    }

    let line = main_with(&[(main_columns::MAGNITUDE_1, "x.4")]);
    match convert::main_header(&RawMain::extract(&line).unwrap(), &line) {
        Err(NordicError::FieldType { field, raw, .. }) => {
            assert_eq!(field, "magnitude_1");
            assert_eq!(raw, "x.4");
        }
        other => panic!("Expected FieldTypeError, got {:?}", other),
    }
}

#[test]
fn test_macroseismic_conversion() {
    use macroseismic_columns as cols;
    let line = record(
        '2',
        &[
            (cols::DESCRIPTION, "Helsinki"),
            (cols::DIASTROPHISM_CODE, "F"),
            (cols::TSUNAMI_CODE, "T"),
            (cols::MAXIMUM_OBSERVED_INTENSITY, " 5"),
            (cols::MAXIMUM_INTENSITY_QUALIFIER, "+"),
            (cols::INTENSITY_SCALE, "EM"),
            (cols::MACROSEISMIC_LATITUDE, "60.17"),
            (cols::MACROSEISMIC_LONGITUDE, " 24.94"),
            (cols::MACROSEISMIC_MAGNITUDE, "3.4"),
            (cols::TYPE_OF_MAGNITUDE, "L"),
            (cols::QUALITY_RANK, "B"),
            (cols::REPORTING_AGENCY, "HEL"),
        ],
    );
    let macroseismic = convert::macroseismic_header(&RawMacroseismic::extract(&line).unwrap())
        .unwrap();

    assert_eq!(macroseismic.description.as_deref(), Some("Helsinki"));
    assert_eq!(macroseismic.diastrophism_code, Some('F'));
    assert_eq!(macroseismic.tsunami_code, Some('T'));
    assert_eq!(macroseismic.seiche_code, None);
    assert_eq!(macroseismic.maximum_observed_intensity, Some(5.0));
    assert_eq!(macroseismic.maximum_intensity_qualifier, Some('+'));
    assert_eq!(macroseismic.intensity_scale.as_deref(), Some("EM"));
    assert_eq!(macroseismic.macroseismic_longitude, Some(24.94));
    assert_eq!(macroseismic.quality_rank, Some('B'));
    assert_eq!(macroseismic.bordering_intensity_1, None);

    let line = record('2', &[(cols::QUALITY_RANK, "E")]);
    let error = convert::macroseismic_header(&RawMacroseismic::extract(&line).unwrap())
        .unwrap_err();
    assert_eq!(error.category(), "EnumError");
}

#[test]
fn test_error_header_conversion() {
    let error = convert::error_header(&RawError::extract(&error_line("123", "5.0")).unwrap())
        .unwrap();
    assert_eq!(error.gap, Some(123));
    assert_eq!(error.second_error, Some(0.4));
    assert_eq!(error.depth_error, Some(5.0));
    assert_eq!(error.magnitude_error, None);

    let result = convert::error_header(&RawError::extract(&error_line("400", "")).unwrap());
    assert_eq!(result.unwrap_err().category(), "RangeError");
}

#[test]
fn test_text_headers() {
    let comment = convert::comment_header("ACTION:UPD 19-05-02 13:30 OP:jh").unwrap();
    assert_eq!(
        comment.comment.as_deref(),
        Some("ACTION:UPD 19-05-02 13:30 OP:jh")
    );
    assert_eq!(convert::waveform_header("").unwrap().waveform_info, None);
}

#[test]
fn test_phase_conversion_with_reference_date() {
    let mut raw = RawPhase::extract(&phase_line("HEL", "", "1305 18.45")).unwrap();
    raw.reference_date = NaiveDate::from_ymd_opt(2019, 5, 2);
    let phase = convert::phase_data(&raw).unwrap();

    assert_eq!(phase.station_code.as_deref(), Some("HEL"));
    assert_eq!(phase.sp_instrument_type, Some('S'));
    assert_eq!(phase.sp_component, Some('Z'));
    assert_eq!(phase.quality_indicator, Some('I'));
    assert_eq!(phase.phase_type.as_deref(), Some("P"));
    assert_eq!(phase.day_offset, DayOffset::None);
    assert_eq!(
        phase.observation_time.unwrap().to_string(),
        "2019-05-02 13:05:18.450"
    );
}

#[test]
fn test_phase_without_reference_date_has_no_time() {
    let raw = RawPhase::extract(&phase_line("HEL", "-", "1305 18.45")).unwrap();
    let phase = convert::phase_data(&raw).unwrap();
    assert_eq!(phase.day_offset, DayOffset::PreviousDay);
    assert_eq!(phase.observation_time, None);
}
