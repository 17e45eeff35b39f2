//! Raw record to typed model conversion
//!
//! One function per record kind. Each runs every field of the raw record
//! through its validator with the bounds and allowed codes of the Nordic
//! format; the first failing field aborts the record.

use chrono::NaiveDateTime;

use super::extractor::{RawError, RawMacroseismic, RawMagnitude, RawMain, RawPhase};
use super::validation::{
    FieldValue, validate_code, validate_date, validate_float, validate_integer, validate_string,
    validate_time,
};
use crate::constants::{
    MAX_AZIMUTH, MAX_DEPTH_KM, MAX_INTENSITY, MAX_LATITUDE, MAX_LONGITUDE, MAX_MAGNITUDE,
    MAX_SECOND, MAX_STATIONS_USED, MAX_TEXT_LENGTH, MIN_MAGNITUDE, allowed,
};
use crate::error::Result;
use crate::models::{
    CommentHeader, DayOffset, ErrorHeader, MacroseismicHeader, Magnitude, MainHeader, PhaseData,
    RecordKind, WaveformHeader,
};

/// Agency codes are at most three characters wide
const AGENCY_LENGTH: usize = 3;

fn magnitude(raw: &RawMagnitude, index: usize, kind: RecordKind) -> Result<Magnitude> {
    Ok(Magnitude {
        value: validate_float(
            &raw.value,
            &format!("magnitude_{}", index),
            Some(MIN_MAGNITUDE),
            Some(MAX_MAGNITUDE),
            kind,
        )?,
        magnitude_type: validate_code(
            &raw.magnitude_type,
            &format!("type_of_magnitude_{}", index),
            None,
            kind,
        )?,
        reporting_agency: validate_string(
            &raw.reporting_agency,
            &format!("magnitude_reporting_agency_{}", index),
            1,
            AGENCY_LENGTH,
            None,
            kind,
        )?,
    })
}

/// Convert a main header, keeping the verbatim source line
pub fn main_header(raw: &RawMain, line: &str) -> Result<MainHeader> {
    let kind = RecordKind::Main;

    let [first, second, third] = &raw.magnitudes;

    Ok(MainHeader {
        origin_date: validate_date(&raw.origin_date, "date", kind)?,
        origin_hour: validate_integer(&raw.origin_hour, "hour", Some(0), Some(23), kind)?,
        origin_minute: validate_integer(&raw.origin_minute, "minute", Some(0), Some(59), kind)?,
        origin_second: validate_float(
            &raw.origin_second,
            "second",
            Some(0.0),
            Some(MAX_SECOND),
            kind,
        )?,
        location_model: validate_code(&raw.location_model, "location_model", None, kind)?,
        distance_indicator: validate_code(
            &raw.distance_indicator,
            "distance_indicator",
            Some(allowed::DISTANCE_INDICATOR),
            kind,
        )?,
        event_desc_id: validate_code(
            &raw.event_desc_id,
            "event_desc_id",
            Some(allowed::EVENT_DESC_ID),
            kind,
        )?,
        epicenter_latitude: validate_float(
            &raw.epicenter_latitude,
            "epicenter_latitude",
            Some(-MAX_LATITUDE),
            Some(MAX_LATITUDE),
            kind,
        )?,
        epicenter_longitude: validate_float(
            &raw.epicenter_longitude,
            "epicenter_longitude",
            Some(-MAX_LONGITUDE),
            Some(MAX_LONGITUDE),
            kind,
        )?,
        depth: validate_float(&raw.depth, "depth", Some(0.0), Some(MAX_DEPTH_KM), kind)?,
        depth_control: validate_code(
            &raw.depth_control,
            "depth_control",
            Some(allowed::DEPTH_CONTROL),
            kind,
        )?,
        locating_indicator: validate_code(
            &raw.locating_indicator,
            "locating_indicator",
            Some(allowed::LOCATING_INDICATOR),
            kind,
        )?,
        epicenter_reporting_agency: validate_string(
            &raw.epicenter_reporting_agency,
            "epicenter_reporting_agency",
            1,
            AGENCY_LENGTH,
            None,
            kind,
        )?,
        stations_used: validate_integer(
            &raw.stations_used,
            "stations_used",
            Some(0),
            Some(MAX_STATIONS_USED),
            kind,
        )?,
        rms_time_residuals: validate_float(
            &raw.rms_time_residuals,
            "rms_time_residuals",
            Some(0.0),
            None,
            kind,
        )?,
        magnitudes: [
            magnitude(first, 1, kind)?,
            magnitude(second, 2, kind)?,
            magnitude(third, 3, kind)?,
        ],
        error_header: None,
        raw_line: line.to_string(),
    })
}

pub fn macroseismic_header(raw: &RawMacroseismic) -> Result<MacroseismicHeader> {
    let kind = RecordKind::Macroseismic;

    Ok(MacroseismicHeader {
        description: validate_string(&raw.description, "description", 0, 15, None, kind)?,
        diastrophism_code: validate_code(
            &raw.diastrophism_code,
            "diastrophism_code",
            Some(allowed::DIASTROPHISM_CODE),
            kind,
        )?,
        tsunami_code: validate_code(
            &raw.tsunami_code,
            "tsunami_code",
            Some(allowed::TSUNAMI_CODE),
            kind,
        )?,
        seiche_code: validate_code(
            &raw.seiche_code,
            "seiche_code",
            Some(allowed::SEICHE_CODE),
            kind,
        )?,
        cultural_effects: validate_code(
            &raw.cultural_effects,
            "cultural_effects",
            Some(allowed::CULTURAL_EFFECTS),
            kind,
        )?,
        unusual_effects: validate_code(
            &raw.unusual_effects,
            "unusual_effects",
            Some(allowed::UNUSUAL_EFFECTS),
            kind,
        )?,
        maximum_observed_intensity: validate_float(
            &raw.maximum_observed_intensity,
            "maximum_observed_intensity",
            Some(0.0),
            Some(MAX_INTENSITY),
            kind,
        )?,
        maximum_intensity_qualifier: validate_code(
            &raw.maximum_intensity_qualifier,
            "maximum_intensity_qualifier",
            Some(allowed::INTENSITY_QUALIFIER),
            kind,
        )?,
        intensity_scale: validate_string(
            &raw.intensity_scale,
            "intensity_scale",
            2,
            2,
            None,
            kind,
        )?,
        macroseismic_latitude: validate_float(
            &raw.macroseismic_latitude,
            "macroseismic_latitude",
            Some(-MAX_LATITUDE),
            Some(MAX_LATITUDE),
            kind,
        )?,
        macroseismic_longitude: validate_float(
            &raw.macroseismic_longitude,
            "macroseismic_longitude",
            Some(-MAX_LONGITUDE),
            Some(MAX_LONGITUDE),
            kind,
        )?,
        macroseismic_magnitude: validate_float(
            &raw.macroseismic_magnitude,
            "macroseismic_magnitude",
            Some(MIN_MAGNITUDE),
            Some(MAX_MAGNITUDE),
            kind,
        )?,
        type_of_magnitude: validate_code(&raw.type_of_magnitude, "type_of_magnitude", None, kind)?,
        logarithm_of_radius: validate_float(
            &raw.logarithm_of_radius,
            "logarithm_of_radius",
            Some(0.0),
            None,
            kind,
        )?,
        logarithm_of_area_1: validate_float(
            &raw.logarithm_of_area_1,
            "logarithm_of_area_1",
            Some(0.0),
            None,
            kind,
        )?,
        bordering_intensity_1: validate_integer(
            &raw.bordering_intensity_1,
            "bordering_intensity_1",
            Some(0),
            Some(12),
            kind,
        )?,
        logarithm_of_area_2: validate_float(
            &raw.logarithm_of_area_2,
            "logarithm_of_area_2",
            Some(0.0),
            None,
            kind,
        )?,
        bordering_intensity_2: validate_integer(
            &raw.bordering_intensity_2,
            "bordering_intensity_2",
            Some(0),
            Some(12),
            kind,
        )?,
        quality_rank: validate_code(
            &raw.quality_rank,
            "quality_rank",
            Some(allowed::QUALITY_RANK),
            kind,
        )?,
        reporting_agency: validate_string(
            &raw.reporting_agency,
            "reporting_agency",
            1,
            AGENCY_LENGTH,
            None,
            kind,
        )?,
    })
}

pub fn error_header(raw: &RawError) -> Result<ErrorHeader> {
    let kind = RecordKind::Error;

    Ok(ErrorHeader {
        gap: validate_integer(&raw.gap, "gap", Some(0), Some(360), kind)?,
        second_error: validate_float(&raw.second_error, "second_error", Some(0.0), None, kind)?,
        epicenter_latitude_error: validate_float(
            &raw.epicenter_latitude_error,
            "epicenter_latitude_error",
            Some(0.0),
            None,
            kind,
        )?,
        epicenter_longitude_error: validate_float(
            &raw.epicenter_longitude_error,
            "epicenter_longitude_error",
            Some(0.0),
            None,
            kind,
        )?,
        depth_error: validate_float(&raw.depth_error, "depth_error", Some(0.0), None, kind)?,
        magnitude_error: validate_float(
            &raw.magnitude_error,
            "magnitude_error",
            Some(0.0),
            None,
            kind,
        )?,
    })
}

pub fn comment_header(text: &str) -> Result<CommentHeader> {
    Ok(CommentHeader {
        comment: validate_string(text, "comment", 0, MAX_TEXT_LENGTH, None, RecordKind::Comment)?,
    })
}

pub fn waveform_header(text: &str) -> Result<WaveformHeader> {
    Ok(WaveformHeader {
        waveform_info: validate_string(
            text,
            "waveform_info",
            0,
            MAX_TEXT_LENGTH,
            None,
            RecordKind::Waveform,
        )?,
    })
}

/// Convert a phase line whose reference date has already been set and shifted
pub fn phase_data(raw: &RawPhase) -> Result<PhaseData> {
    let kind = RecordKind::PhaseData;

    let time_info = validate_code(&raw.time_info, "time_info", Some(allowed::TIME_INFO), kind)?;
    let time_of_day = validate_time(&raw.observation_time, "observation_time", kind)?;
    let observation_time = match (raw.reference_date, time_of_day) {
        (Some(date), Some(time)) => validate_date(FieldValue::Typed(date), "date", kind)?
            .map(|date| NaiveDateTime::new(date, time)),
        _ => None,
    };

    Ok(PhaseData {
        station_code: validate_string(&raw.station_code, "station_code", 1, 5, None, kind)?,
        sp_instrument_type: validate_code(
            &raw.sp_instrument_type,
            "sp_instrument_type",
            None,
            kind,
        )?,
        sp_component: validate_code(&raw.sp_component, "sp_component", None, kind)?,
        quality_indicator: validate_code(
            &raw.quality_indicator,
            "quality_indicator",
            Some(allowed::QUALITY_INDICATOR),
            kind,
        )?,
        phase_type: validate_string(&raw.phase_type, "phase_type", 1, 4, None, kind)?,
        weight: validate_integer(&raw.weight, "weight", Some(0), Some(9), kind)?,
        first_motion: validate_code(
            &raw.first_motion,
            "first_motion",
            Some(allowed::FIRST_MOTION),
            kind,
        )?,
        day_offset: DayOffset::from_code(time_info),
        observation_time,
        signal_duration: validate_integer(
            &raw.signal_duration,
            "signal_duration",
            Some(0),
            None,
            kind,
        )?,
        max_amplitude: validate_float(&raw.max_amplitude, "max_amplitude", Some(0.0), None, kind)?,
        max_amplitude_period: validate_float(
            &raw.max_amplitude_period,
            "max_amplitude_period",
            Some(0.0),
            None,
            kind,
        )?,
        back_azimuth: validate_float(
            &raw.back_azimuth,
            "back_azimuth",
            Some(0.0),
            Some(MAX_AZIMUTH),
            kind,
        )?,
        apparent_velocity: validate_float(
            &raw.apparent_velocity,
            "apparent_velocity",
            Some(0.0),
            None,
            kind,
        )?,
        signal_to_noise: validate_float(
            &raw.signal_to_noise,
            "signal_to_noise",
            Some(0.0),
            None,
            kind,
        )?,
        azimuth_residual: validate_integer(
            &raw.azimuth_residual,
            "azimuth_residual",
            Some(-360),
            Some(360),
            kind,
        )?,
        travel_time_residual: validate_float(
            &raw.travel_time_residual,
            "travel_time_residual",
            None,
            None,
            kind,
        )?,
        location_weight: validate_integer(
            &raw.location_weight,
            "location_weight",
            Some(0),
            Some(99),
            kind,
        )?,
        epicenter_distance: validate_float(
            &raw.epicenter_distance,
            "epicenter_distance",
            Some(0.0),
            None,
            kind,
        )?,
        epicenter_to_station_azimuth: validate_integer(
            &raw.epicenter_to_station_azimuth,
            "epicenter_to_station_azimuth",
            Some(0),
            Some(360),
            kind,
        )?,
    })
}
