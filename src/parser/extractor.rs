//! Fixed-column field extraction
//!
//! Slices trimmed substrings out of a record line using the column tables in
//! [`crate::constants`], and groups them into one raw, still untyped, record
//! per line kind. Nothing here looks at what the text means; only the column
//! boundaries are checked.

use chrono::NaiveDate;
use std::ops::Range;

use crate::constants::{
    RECORD_WIDTH, comment_columns, error_columns, instruction_columns, macroseismic_columns,
    main_columns, phase_columns, waveform_columns,
};
use crate::error::{NordicError, Result};
use crate::models::RecordKind;

/// Extract the trimmed text between two character columns
pub fn extract(line: &str, start: usize, end: usize, kind: RecordKind) -> Result<&str> {
    if end < start {
        return Err(NordicError::malformed_line(kind, start, line));
    }
    if line.is_ascii() {
        return line
            .get(start..end)
            .map(str::trim)
            .ok_or_else(|| NordicError::malformed_line(kind, end, line));
    }

    // Latin-1 text decoded to UTF-8: map character columns to byte offsets
    let mut offsets = line.char_indices().map(|(offset, _)| offset);
    let byte_start = offsets.nth(start);
    let byte_end = if end == start {
        byte_start
    } else {
        offsets.nth(end - start - 1).or_else(|| {
            (line.chars().count() == end).then_some(line.len())
        })
    };

    match (byte_start, byte_end) {
        (Some(from), Some(to)) => Ok(line[from..to].trim()),
        _ => Err(NordicError::malformed_line(kind, end, line)),
    }
}

/// Extract a column range from the column tables
pub fn extract_range(line: &str, columns: Range<usize>, kind: RecordKind) -> Result<&str> {
    extract(line, columns.start, columns.end, kind)
}

/// Reject lines narrower than the record width before any slicing
fn ensure_width(line: &str, kind: RecordKind) -> Result<()> {
    if line.chars().count() < RECORD_WIDTH {
        return Err(NordicError::malformed_line(kind, RECORD_WIDTH, line));
    }
    Ok(())
}

fn field(line: &str, columns: Range<usize>, kind: RecordKind) -> Result<String> {
    extract_range(line, columns, kind).map(str::to_string)
}

/// Composite fields (dates, times) are read by position, so only trailing
/// blanks are removed
fn positional_field(line: &str, columns: Range<usize>, kind: RecordKind) -> Result<String> {
    let start = columns.start;
    let end = columns.end;
    // The trimmed extract doubles as the bounds check and the blank check
    if extract(line, start, end, kind)?.is_empty() {
        return Ok(String::new());
    }
    let text: String = line.chars().skip(start).take(end - start).collect();
    Ok(text.trim_end().to_string())
}

/// Untyped magnitude triple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMagnitude {
    pub value: String,
    pub magnitude_type: String,
    pub reporting_agency: String,
}

/// Untyped main header fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMain {
    /// "YYYY MMDD" shaped date, leading blanks kept
    pub origin_date: String,
    pub origin_hour: String,
    pub origin_minute: String,
    pub origin_second: String,
    pub location_model: String,
    pub distance_indicator: String,
    pub event_desc_id: String,
    pub epicenter_latitude: String,
    pub epicenter_longitude: String,
    pub depth: String,
    pub depth_control: String,
    pub locating_indicator: String,
    pub epicenter_reporting_agency: String,
    pub stations_used: String,
    pub rms_time_residuals: String,
    pub magnitudes: [RawMagnitude; 3],
}

impl RawMain {
    pub fn extract(line: &str) -> Result<Self> {
        let kind = RecordKind::Main;
        ensure_width(line, kind)?;

        let magnitude = |value: Range<usize>,
                         magnitude_type: Range<usize>,
                         agency: Range<usize>|
         -> Result<RawMagnitude> {
            Ok(RawMagnitude {
                value: field(line, value, kind)?,
                magnitude_type: field(line, magnitude_type, kind)?,
                reporting_agency: field(line, agency, kind)?,
            })
        };

        Ok(Self {
            origin_date: positional_field(line, main_columns::ORIGIN_DATE, kind)?,
            origin_hour: field(line, main_columns::ORIGIN_HOUR, kind)?,
            origin_minute: field(line, main_columns::ORIGIN_MINUTE, kind)?,
            origin_second: field(line, main_columns::ORIGIN_SECOND, kind)?,
            location_model: field(line, main_columns::LOCATION_MODEL, kind)?,
            distance_indicator: field(line, main_columns::DISTANCE_INDICATOR, kind)?,
            event_desc_id: field(line, main_columns::EVENT_DESC_ID, kind)?,
            epicenter_latitude: field(line, main_columns::EPICENTER_LATITUDE, kind)?,
            epicenter_longitude: field(line, main_columns::EPICENTER_LONGITUDE, kind)?,
            depth: field(line, main_columns::DEPTH, kind)?,
            depth_control: field(line, main_columns::DEPTH_CONTROL, kind)?,
            locating_indicator: field(line, main_columns::LOCATING_INDICATOR, kind)?,
            epicenter_reporting_agency: field(
                line,
                main_columns::EPICENTER_REPORTING_AGENCY,
                kind,
            )?,
            stations_used: field(line, main_columns::STATIONS_USED, kind)?,
            rms_time_residuals: field(line, main_columns::RMS_TIME_RESIDUALS, kind)?,
            magnitudes: [
                magnitude(
                    main_columns::MAGNITUDE_1,
                    main_columns::TYPE_OF_MAGNITUDE_1,
                    main_columns::MAGNITUDE_REPORTING_AGENCY_1,
                )?,
                magnitude(
                    main_columns::MAGNITUDE_2,
                    main_columns::TYPE_OF_MAGNITUDE_2,
                    main_columns::MAGNITUDE_REPORTING_AGENCY_2,
                )?,
                magnitude(
                    main_columns::MAGNITUDE_3,
                    main_columns::TYPE_OF_MAGNITUDE_3,
                    main_columns::MAGNITUDE_REPORTING_AGENCY_3,
                )?,
            ],
        })
    }
}

/// Untyped macroseismic header fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMacroseismic {
    pub description: String,
    pub diastrophism_code: String,
    pub tsunami_code: String,
    pub seiche_code: String,
    pub cultural_effects: String,
    pub unusual_effects: String,
    pub maximum_observed_intensity: String,
    pub maximum_intensity_qualifier: String,
    pub intensity_scale: String,
    pub macroseismic_latitude: String,
    pub macroseismic_longitude: String,
    pub macroseismic_magnitude: String,
    pub type_of_magnitude: String,
    pub logarithm_of_radius: String,
    pub logarithm_of_area_1: String,
    pub bordering_intensity_1: String,
    pub logarithm_of_area_2: String,
    pub bordering_intensity_2: String,
    pub quality_rank: String,
    pub reporting_agency: String,
}

impl RawMacroseismic {
    pub fn extract(line: &str) -> Result<Self> {
        use macroseismic_columns as cols;
        let kind = RecordKind::Macroseismic;
        ensure_width(line, kind)?;

        Ok(Self {
            description: field(line, cols::DESCRIPTION, kind)?,
            diastrophism_code: field(line, cols::DIASTROPHISM_CODE, kind)?,
            tsunami_code: field(line, cols::TSUNAMI_CODE, kind)?,
            seiche_code: field(line, cols::SEICHE_CODE, kind)?,
            cultural_effects: field(line, cols::CULTURAL_EFFECTS, kind)?,
            unusual_effects: field(line, cols::UNUSUAL_EFFECTS, kind)?,
            maximum_observed_intensity: field(line, cols::MAXIMUM_OBSERVED_INTENSITY, kind)?,
            maximum_intensity_qualifier: field(line, cols::MAXIMUM_INTENSITY_QUALIFIER, kind)?,
            intensity_scale: field(line, cols::INTENSITY_SCALE, kind)?,
            macroseismic_latitude: field(line, cols::MACROSEISMIC_LATITUDE, kind)?,
            macroseismic_longitude: field(line, cols::MACROSEISMIC_LONGITUDE, kind)?,
            macroseismic_magnitude: field(line, cols::MACROSEISMIC_MAGNITUDE, kind)?,
            type_of_magnitude: field(line, cols::TYPE_OF_MAGNITUDE, kind)?,
            logarithm_of_radius: field(line, cols::LOGARITHM_OF_RADIUS, kind)?,
            logarithm_of_area_1: field(line, cols::LOGARITHM_OF_AREA_1, kind)?,
            bordering_intensity_1: field(line, cols::BORDERING_INTENSITY_1, kind)?,
            logarithm_of_area_2: field(line, cols::LOGARITHM_OF_AREA_2, kind)?,
            bordering_intensity_2: field(line, cols::BORDERING_INTENSITY_2, kind)?,
            quality_rank: field(line, cols::QUALITY_RANK, kind)?,
            reporting_agency: field(line, cols::REPORTING_AGENCY, kind)?,
        })
    }
}

/// Untyped error header fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawError {
    pub gap: String,
    pub second_error: String,
    pub epicenter_latitude_error: String,
    pub epicenter_longitude_error: String,
    pub depth_error: String,
    pub magnitude_error: String,
}

impl RawError {
    pub fn extract(line: &str) -> Result<Self> {
        let kind = RecordKind::Error;
        ensure_width(line, kind)?;

        Ok(Self {
            gap: field(line, error_columns::GAP, kind)?,
            second_error: field(line, error_columns::SECOND_ERROR, kind)?,
            epicenter_latitude_error: field(line, error_columns::EPICENTER_LATITUDE_ERROR, kind)?,
            epicenter_longitude_error: field(
                line,
                error_columns::EPICENTER_LONGITUDE_ERROR,
                kind,
            )?,
            depth_error: field(line, error_columns::DEPTH_ERROR, kind)?,
            magnitude_error: field(line, error_columns::MAGNITUDE_ERROR, kind)?,
        })
    }
}

/// Comment line text
pub fn extract_comment(line: &str) -> Result<String> {
    ensure_width(line, RecordKind::Comment)?;
    field(line, comment_columns::COMMENT, RecordKind::Comment)
}

/// Waveform reference text
pub fn extract_waveform(line: &str) -> Result<String> {
    ensure_width(line, RecordKind::Waveform)?;
    field(line, waveform_columns::WAVEFORM_INFO, RecordKind::Waveform)
}

/// Native event id text of an instruction line
pub fn extract_root_reference(line: &str) -> Result<String> {
    ensure_width(line, RecordKind::Instruction)?;
    field(
        line,
        instruction_columns::ROOT_EVENT_ID,
        RecordKind::Instruction,
    )
}

/// Untyped phase data fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPhase {
    pub station_code: String,
    pub sp_instrument_type: String,
    pub sp_component: String,
    pub quality_indicator: String,
    pub phase_type: String,
    pub weight: String,
    pub first_motion: String,
    pub time_info: String,
    /// "HHMM SS.ss" shaped time of day, leading blanks kept
    pub observation_time: String,
    pub signal_duration: String,
    pub max_amplitude: String,
    pub max_amplitude_period: String,
    pub back_azimuth: String,
    pub apparent_velocity: String,
    pub signal_to_noise: String,
    pub azimuth_residual: String,
    pub travel_time_residual: String,
    pub location_weight: String,
    pub epicenter_distance: String,
    pub epicenter_to_station_azimuth: String,
    /// Date of the event's first main header, set by the assembler
    pub reference_date: Option<NaiveDate>,
    /// Whether the day offset has already been folded into `reference_date`
    pub day_offset_applied: bool,
}

impl RawPhase {
    pub fn extract(line: &str) -> Result<Self> {
        use phase_columns as cols;
        let kind = RecordKind::PhaseData;
        ensure_width(line, kind)?;

        Ok(Self {
            station_code: field(line, cols::STATION_CODE, kind)?,
            sp_instrument_type: field(line, cols::SP_INSTRUMENT_TYPE, kind)?,
            sp_component: field(line, cols::SP_COMPONENT, kind)?,
            quality_indicator: field(line, cols::QUALITY_INDICATOR, kind)?,
            phase_type: field(line, cols::PHASE_TYPE, kind)?,
            weight: field(line, cols::WEIGHT, kind)?,
            first_motion: field(line, cols::FIRST_MOTION, kind)?,
            time_info: field(line, cols::TIME_INFO, kind)?,
            observation_time: positional_field(line, cols::OBSERVATION_TIME, kind)?,
            signal_duration: field(line, cols::SIGNAL_DURATION, kind)?,
            max_amplitude: field(line, cols::MAX_AMPLITUDE, kind)?,
            max_amplitude_period: field(line, cols::MAX_AMPLITUDE_PERIOD, kind)?,
            back_azimuth: field(line, cols::BACK_AZIMUTH, kind)?,
            apparent_velocity: field(line, cols::APPARENT_VELOCITY, kind)?,
            signal_to_noise: field(line, cols::SIGNAL_TO_NOISE, kind)?,
            azimuth_residual: field(line, cols::AZIMUTH_RESIDUAL, kind)?,
            travel_time_residual: field(line, cols::TRAVEL_TIME_RESIDUAL, kind)?,
            location_weight: field(line, cols::LOCATION_WEIGHT, kind)?,
            epicenter_distance: field(line, cols::EPICENTER_DISTANCE, kind)?,
            epicenter_to_station_azimuth: field(line, cols::EPICENTER_TO_STATION_AZIMUTH, kind)?,
            reference_date: None,
            day_offset_applied: false,
        })
    }
}
