//! Format constants for Nordic bulletin records
//!
//! This module holds the fixed column tables for every record kind, the tag
//! characters that identify them, and the allowed-value sets enforced by the
//! validator. Columns are 0-based, half-open character ranges; for the ASCII
//! lines that make up nearly every bulletin they are also byte offsets.

use std::ops::Range;

// =============================================================================
// Record Layout
// =============================================================================

/// Fixed width of every Nordic record line
pub const RECORD_WIDTH: usize = 80;

/// Column holding the record type tag (column 80 when counted from 1)
pub const TAG_COLUMN: usize = 79;

/// Record type tag characters
pub mod tags {
    pub const MAIN: char = '1';
    pub const MACROSEISMIC: char = '2';
    pub const COMMENT: char = '3';
    pub const PHASE: char = '4';
    pub const ERROR: char = '5';
    pub const WAVEFORM: char = '6';
    pub const PHASE_CAPTION: char = '7';
    pub const INSTRUCTION: char = 'I';
    pub const BLANK: char = ' ';
}

// =============================================================================
// Column Tables
// =============================================================================
//
// Two header layouts circulate for the main header and the phase line. The
// table below is the one used by the event reader: magnitude 3 at 72..75 and
// station code at 1..6.

/// Main (type 1) header columns
pub mod main_columns {
    use super::Range;

    pub const ORIGIN_DATE: Range<usize> = 1..10;
    pub const ORIGIN_HOUR: Range<usize> = 11..13;
    pub const ORIGIN_MINUTE: Range<usize> = 13..15;
    pub const ORIGIN_SECOND: Range<usize> = 16..20;
    pub const LOCATION_MODEL: Range<usize> = 20..21;
    pub const DISTANCE_INDICATOR: Range<usize> = 21..22;
    pub const EVENT_DESC_ID: Range<usize> = 22..23;
    pub const EPICENTER_LATITUDE: Range<usize> = 23..30;
    pub const EPICENTER_LONGITUDE: Range<usize> = 30..38;
    pub const DEPTH: Range<usize> = 38..43;
    pub const DEPTH_CONTROL: Range<usize> = 43..44;
    pub const LOCATING_INDICATOR: Range<usize> = 44..45;
    pub const EPICENTER_REPORTING_AGENCY: Range<usize> = 45..48;
    pub const STATIONS_USED: Range<usize> = 48..51;
    pub const RMS_TIME_RESIDUALS: Range<usize> = 51..55;
    pub const MAGNITUDE_1: Range<usize> = 56..59;
    pub const TYPE_OF_MAGNITUDE_1: Range<usize> = 59..60;
    pub const MAGNITUDE_REPORTING_AGENCY_1: Range<usize> = 60..63;
    pub const MAGNITUDE_2: Range<usize> = 64..67;
    pub const TYPE_OF_MAGNITUDE_2: Range<usize> = 67..68;
    pub const MAGNITUDE_REPORTING_AGENCY_2: Range<usize> = 68..71;
    pub const MAGNITUDE_3: Range<usize> = 72..75;
    pub const TYPE_OF_MAGNITUDE_3: Range<usize> = 75..76;
    pub const MAGNITUDE_REPORTING_AGENCY_3: Range<usize> = 76..79;
}

/// Macroseismic (type 2) header columns
pub mod macroseismic_columns {
    use super::Range;

    pub const DESCRIPTION: Range<usize> = 5..20;
    pub const DIASTROPHISM_CODE: Range<usize> = 21..22;
    pub const TSUNAMI_CODE: Range<usize> = 22..23;
    pub const SEICHE_CODE: Range<usize> = 23..24;
    pub const CULTURAL_EFFECTS: Range<usize> = 24..25;
    pub const UNUSUAL_EFFECTS: Range<usize> = 25..26;
    pub const MAXIMUM_OBSERVED_INTENSITY: Range<usize> = 27..29;
    pub const MAXIMUM_INTENSITY_QUALIFIER: Range<usize> = 29..30;
    pub const INTENSITY_SCALE: Range<usize> = 30..32;
    pub const MACROSEISMIC_LATITUDE: Range<usize> = 33..39;
    pub const MACROSEISMIC_LONGITUDE: Range<usize> = 40..47;
    pub const MACROSEISMIC_MAGNITUDE: Range<usize> = 48..51;
    pub const TYPE_OF_MAGNITUDE: Range<usize> = 51..52;
    pub const LOGARITHM_OF_RADIUS: Range<usize> = 52..56;
    pub const LOGARITHM_OF_AREA_1: Range<usize> = 56..61;
    pub const BORDERING_INTENSITY_1: Range<usize> = 61..63;
    pub const LOGARITHM_OF_AREA_2: Range<usize> = 63..68;
    pub const BORDERING_INTENSITY_2: Range<usize> = 68..70;
    pub const QUALITY_RANK: Range<usize> = 71..72;
    pub const REPORTING_AGENCY: Range<usize> = 72..75;
}

/// Comment (type 3) header columns
pub mod comment_columns {
    use super::Range;

    pub const COMMENT: Range<usize> = 1..79;
}

/// Error (type 5) header columns
pub mod error_columns {
    use super::Range;

    pub const GAP: Range<usize> = 5..8;
    pub const SECOND_ERROR: Range<usize> = 16..20;
    pub const EPICENTER_LATITUDE_ERROR: Range<usize> = 24..30;
    pub const EPICENTER_LONGITUDE_ERROR: Range<usize> = 31..38;
    pub const DEPTH_ERROR: Range<usize> = 40..43;
    pub const MAGNITUDE_ERROR: Range<usize> = 56..59;
}

/// Waveform reference (type 6) header columns
pub mod waveform_columns {
    use super::Range;

    pub const WAVEFORM_INFO: Range<usize> = 1..79;
}

/// Instruction / root reference (type I) header columns
pub mod instruction_columns {
    use super::Range;

    pub const ROOT_EVENT_ID: Range<usize> = 4..78;
}

/// Phase data (type 4 or blank) line columns
pub mod phase_columns {
    use super::Range;

    pub const STATION_CODE: Range<usize> = 1..6;
    pub const SP_INSTRUMENT_TYPE: Range<usize> = 6..7;
    pub const SP_COMPONENT: Range<usize> = 7..8;
    pub const QUALITY_INDICATOR: Range<usize> = 9..10;
    pub const PHASE_TYPE: Range<usize> = 10..14;
    pub const WEIGHT: Range<usize> = 14..15;
    pub const FIRST_MOTION: Range<usize> = 16..17;
    pub const TIME_INFO: Range<usize> = 17..18;
    pub const OBSERVATION_TIME: Range<usize> = 18..28;
    pub const SIGNAL_DURATION: Range<usize> = 29..33;
    pub const MAX_AMPLITUDE: Range<usize> = 34..40;
    pub const MAX_AMPLITUDE_PERIOD: Range<usize> = 41..45;
    pub const BACK_AZIMUTH: Range<usize> = 46..52;
    pub const APPARENT_VELOCITY: Range<usize> = 52..56;
    pub const SIGNAL_TO_NOISE: Range<usize> = 56..60;
    pub const AZIMUTH_RESIDUAL: Range<usize> = 60..63;
    pub const TRAVEL_TIME_RESIDUAL: Range<usize> = 63..68;
    pub const LOCATION_WEIGHT: Range<usize> = 68..70;
    pub const EPICENTER_DISTANCE: Range<usize> = 70..75;
    pub const EPICENTER_TO_STATION_AZIMUTH: Range<usize> = 76..79;
}

// =============================================================================
// Allowed Values
// =============================================================================

/// Allowed single-character codes per field
pub mod allowed {
    /// Event type: ' ' presumed earthquake is carried as absent
    pub const EVENT_DESC_ID: &[char] = &['*', 'Q', 'E', 'P', 'I', 'V', 'X', 'L', 'R'];
    pub const DISTANCE_INDICATOR: &[char] = &['L', 'R', 'D'];
    pub const DEPTH_CONTROL: &[char] = &['F', 'S'];
    pub const LOCATING_INDICATOR: &[char] = &['-', '*'];
    pub const FIRST_MOTION: &[char] = &['C', 'D', '+', '-'];
    pub const TIME_INFO: &[char] = &['+', '-'];
    pub const QUALITY_INDICATOR: &[char] = &['I', 'E'];
    pub const INTENSITY_QUALIFIER: &[char] = &['+', '-'];
    pub const QUALITY_RANK: &[char] = &['A', 'B', 'C', 'D'];
    pub const DIASTROPHISM_CODE: &[char] = &['F', 'U', 'D'];
    pub const TSUNAMI_CODE: &[char] = &['T', 'Q'];
    pub const SEICHE_CODE: &[char] = &['S', 'Q'];
    pub const CULTURAL_EFFECTS: &[char] = &['C', 'D', 'F', 'H'];
    pub const UNUSUAL_EFFECTS: &[char] = &['L', 'G', 'S', 'B', 'C', 'V', 'O', 'M'];
}

/// Depth control code meaning the depth was fixed rather than solved for
pub const FIXED_DEPTH: char = 'F';

// =============================================================================
// Numeric Bounds
// =============================================================================

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MAX_AZIMUTH: f64 = 360.0;
pub const MAX_DEPTH_KM: f64 = 999.9;
pub const MIN_MAGNITUDE: f64 = -9.9;
pub const MAX_MAGNITUDE: f64 = 9.9;
pub const MAX_SECOND: f64 = 59.999;
pub const MAX_INTENSITY: f64 = 12.0;
pub const MAX_STATIONS_USED: i32 = 999;

/// Maximum length of a free-text comment or waveform reference
pub const MAX_TEXT_LENGTH: usize = 78;
