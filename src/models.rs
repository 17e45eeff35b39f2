//! Data models for Nordic bulletin events
//!
//! This module contains the typed event model produced by the parser. Every
//! field is independently optional: `None` means the columns were blank in the
//! source line, which is distinct from zero and from an invalid value (the
//! latter never reaches the model, it fails validation instead).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NordicError;

/// Identity value used before an event or root event has been persisted
pub const UNASSIGNED_ID: i64 = -1;

// =============================================================================
// Record Kinds
// =============================================================================

/// Structural kind of a single bulletin line, decided by its tag column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Main,
    Macroseismic,
    Comment,
    Error,
    Waveform,
    Instruction,
    PhaseCaption,
    PhaseData,
}

impl RecordKind {
    /// Human readable name used in validation messages
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Main => "Nordic Main Header",
            RecordKind::Macroseismic => "Nordic Macroseismic Header",
            RecordKind::Comment => "Nordic Comment Header",
            RecordKind::Error => "Nordic Error Header",
            RecordKind::Waveform => "Nordic Waveform Header",
            RecordKind::Instruction => "Nordic Instruction Header",
            RecordKind::PhaseCaption => "Nordic Phase Caption",
            RecordKind::PhaseData => "Nordic Phase Data",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Event Level Enumerations
// =============================================================================

/// Solution type tag attached to a whole event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SolutionType {
    #[default]
    Other,
    Automatic,
    Reviewed,
    Preliminary,
    Final,
}

impl SolutionType {
    pub const ALL: [SolutionType; 5] = [
        SolutionType::Other,
        SolutionType::Automatic,
        SolutionType::Reviewed,
        SolutionType::Preliminary,
        SolutionType::Final,
    ];

    pub fn code(&self) -> char {
        match self {
            SolutionType::Other => 'O',
            SolutionType::Automatic => 'A',
            SolutionType::Reviewed => 'R',
            SolutionType::Preliminary => 'P',
            SolutionType::Final => 'F',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|solution| solution.code() == code.to_ascii_uppercase())
    }
}

impl FromStr for SolutionType {
    type Err = NordicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let solution = match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => None,
        };
        solution.ok_or_else(|| {
            NordicError::configuration(format!(
                "Unknown solution type '{}' (expected one of O, A, R, P, F)",
                s
            ))
        })
    }
}

/// Day offset of a phase reading relative to the event's reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayOffset {
    #[default]
    None,
    NextDay,
    PreviousDay,
}

impl DayOffset {
    pub fn from_code(code: Option<char>) -> Self {
        match code {
            Some('+') => DayOffset::NextDay,
            Some('-') => DayOffset::PreviousDay,
            _ => DayOffset::None,
        }
    }

    pub fn code(&self) -> Option<char> {
        match self {
            DayOffset::None => None,
            DayOffset::NextDay => Some('+'),
            DayOffset::PreviousDay => Some('-'),
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            DayOffset::None => 0,
            DayOffset::NextDay => 1,
            DayOffset::PreviousDay => -1,
        }
    }
}

// =============================================================================
// Header Records
// =============================================================================

/// One magnitude estimate of a main header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    pub value: Option<f64>,
    pub magnitude_type: Option<char>,
    pub reporting_agency: Option<String>,
}

impl Magnitude {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.magnitude_type.is_none() && self.reporting_agency.is_none()
    }
}

/// Main (type 1) header: one origin solution for the event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainHeader {
    pub origin_date: Option<NaiveDate>,
    pub origin_hour: Option<u32>,
    pub origin_minute: Option<u32>,
    pub origin_second: Option<f64>,
    pub location_model: Option<char>,
    pub distance_indicator: Option<char>,
    pub event_desc_id: Option<char>,
    pub epicenter_latitude: Option<f64>,
    pub epicenter_longitude: Option<f64>,
    /// Depth in kilometres
    pub depth: Option<f64>,
    pub depth_control: Option<char>,
    pub locating_indicator: Option<char>,
    pub epicenter_reporting_agency: Option<String>,
    pub stations_used: Option<i32>,
    pub rms_time_residuals: Option<f64>,
    pub magnitudes: [Magnitude; 3],
    pub error_header: Option<ErrorHeader>,
    /// Verbatim source line, kept for regenerating the bulletin
    pub raw_line: String,
}

impl MainHeader {
    /// Origin time of day, available once hour and minute are both present
    pub fn origin_time(&self) -> Option<NaiveTime> {
        let hour = self.origin_hour?;
        let minute = self.origin_minute?;
        let second = self.origin_second.unwrap_or(0.0);
        let whole = second.trunc() as u32;
        let nanos = ((second - second.trunc()) * 1e9).round() as u32;
        NaiveTime::from_hms_nano_opt(hour, minute, whole, nanos.min(999_999_999))
    }

    /// Reference instant for phase readings: origin date at origin time, or midnight
    pub fn reference_datetime(&self) -> Option<NaiveDateTime> {
        let date = self.origin_date?;
        Some(date.and_time(self.origin_time().unwrap_or(NaiveTime::MIN)))
    }

    pub fn has_fixed_depth(&self) -> bool {
        self.depth_control == Some(crate::constants::FIXED_DEPTH)
    }
}

/// Macroseismic (type 2) header: felt report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroseismicHeader {
    pub description: Option<String>,
    pub diastrophism_code: Option<char>,
    pub tsunami_code: Option<char>,
    pub seiche_code: Option<char>,
    pub cultural_effects: Option<char>,
    pub unusual_effects: Option<char>,
    pub maximum_observed_intensity: Option<f64>,
    pub maximum_intensity_qualifier: Option<char>,
    pub intensity_scale: Option<String>,
    pub macroseismic_latitude: Option<f64>,
    pub macroseismic_longitude: Option<f64>,
    pub macroseismic_magnitude: Option<f64>,
    pub type_of_magnitude: Option<char>,
    pub logarithm_of_radius: Option<f64>,
    pub logarithm_of_area_1: Option<f64>,
    pub bordering_intensity_1: Option<i32>,
    pub logarithm_of_area_2: Option<f64>,
    pub bordering_intensity_2: Option<i32>,
    pub quality_rank: Option<char>,
    pub reporting_agency: Option<String>,
}

/// Comment (type 3) header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentHeader {
    pub comment: Option<String>,
}

/// Error (type 5) header: uncertainty of the main header it is bound to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorHeader {
    pub gap: Option<i32>,
    pub second_error: Option<f64>,
    pub epicenter_latitude_error: Option<f64>,
    pub epicenter_longitude_error: Option<f64>,
    pub depth_error: Option<f64>,
    pub magnitude_error: Option<f64>,
}

/// Waveform reference (type 6) header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveformHeader {
    pub waveform_info: Option<String>,
}

// =============================================================================
// Phase Data
// =============================================================================

/// One station observation of the event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseData {
    pub station_code: Option<String>,
    pub sp_instrument_type: Option<char>,
    pub sp_component: Option<char>,
    pub quality_indicator: Option<char>,
    pub phase_type: Option<String>,
    pub weight: Option<i32>,
    pub first_motion: Option<char>,
    pub day_offset: DayOffset,
    /// Absolute observation time derived from the event reference date
    pub observation_time: Option<NaiveDateTime>,
    pub signal_duration: Option<i32>,
    pub max_amplitude: Option<f64>,
    pub max_amplitude_period: Option<f64>,
    pub back_azimuth: Option<f64>,
    pub apparent_velocity: Option<f64>,
    pub signal_to_noise: Option<f64>,
    pub azimuth_residual: Option<i32>,
    pub travel_time_residual: Option<f64>,
    pub location_weight: Option<i32>,
    pub epicenter_distance: Option<f64>,
    pub epicenter_to_station_azimuth: Option<i32>,
}

// =============================================================================
// Event Aggregate
// =============================================================================

/// Root aggregate for one seismic event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Identity assigned on persistence
    pub event_id: i64,
    /// Identity of the root event of an event chain
    pub root_id: i64,
    pub solution_type: SolutionType,
    pub main_headers: Vec<MainHeader>,
    pub macroseismic_headers: Vec<MacroseismicHeader>,
    pub comment_headers: Vec<CommentHeader>,
    pub waveform_headers: Vec<WaveformHeader>,
    pub phase_data: Vec<PhaseData>,
}

impl Event {
    pub fn new(solution_type: SolutionType) -> Self {
        Self {
            event_id: UNASSIGNED_ID,
            root_id: UNASSIGNED_ID,
            solution_type,
            main_headers: Vec::new(),
            macroseismic_headers: Vec::new(),
            comment_headers: Vec::new(),
            waveform_headers: Vec::new(),
            phase_data: Vec::new(),
        }
    }

    /// Attach the identity generated by the store
    pub fn assign_id(&mut self, event_id: i64) {
        self.event_id = event_id;
    }

    /// The primary solution, whose date anchors every phase reading
    pub fn first_main(&self) -> Option<&MainHeader> {
        self.main_headers.first()
    }

    /// Error headers in main header order
    pub fn error_headers(&self) -> impl Iterator<Item = &ErrorHeader> {
        self.main_headers
            .iter()
            .filter_map(|main| main.error_header.as_ref())
    }

    /// An event is only usable with at least one main header
    pub fn is_valid(&self) -> bool {
        !self.main_headers.is_empty()
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new(SolutionType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_type_codes() {
        assert_eq!(SolutionType::default(), SolutionType::Other);
        assert_eq!(SolutionType::from_code('f'), Some(SolutionType::Final));
        assert_eq!("A".parse::<SolutionType>().unwrap(), SolutionType::Automatic);
        assert!("XX".parse::<SolutionType>().is_err());
        assert!("Z".parse::<SolutionType>().is_err());
    }

    #[test]
    fn test_day_offset_codes() {
        assert_eq!(DayOffset::from_code(Some('+')), DayOffset::NextDay);
        assert_eq!(DayOffset::from_code(Some('-')).days(), -1);
        assert_eq!(DayOffset::from_code(None), DayOffset::None);
        assert_eq!(DayOffset::NextDay.code(), Some('+'));
    }

    #[test]
    fn test_reference_datetime_defaults_to_midnight() {
        let mut main = MainHeader {
            origin_date: NaiveDate::from_ymd_opt(2019, 5, 2),
            ..Default::default()
        };
        assert_eq!(
            main.reference_datetime().unwrap().to_string(),
            "2019-05-02 00:00:00"
        );

        // Hour alone is not enough for a time of day
        main.origin_hour = Some(13);
        assert_eq!(main.origin_time(), None);

        main.origin_minute = Some(5);
        main.origin_second = Some(12.5);
        assert_eq!(
            main.reference_datetime().unwrap().to_string(),
            "2019-05-02 13:05:12.500"
        );
    }

    #[test]
    fn test_event_identity() {
        let mut event = Event::new(SolutionType::Final);
        assert_eq!(event.event_id, UNASSIGNED_ID);
        assert_eq!(event.root_id, UNASSIGNED_ID);
        assert!(!event.is_valid());

        event.assign_id(42);
        event.main_headers.push(MainHeader::default());
        assert_eq!(event.event_id, 42);
        assert!(event.is_valid());
        assert_eq!(event.error_headers().count(), 0);
    }
}
