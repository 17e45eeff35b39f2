//! Record classification by tag column
//!
//! A Nordic line declares its kind with a single character in column 80.
//! Header lines carry a digit or `I`; phase lines carry a blank (or `4`).

use crate::constants::{TAG_COLUMN, tags};
use crate::error::{NordicError, Result};
use crate::models::RecordKind;

/// Read the tag character of a line
pub fn tag_of(line: &str) -> Option<char> {
    line.chars().nth(TAG_COLUMN)
}

/// Map a tag character to its record kind
pub fn kind_for_tag(tag: char) -> Option<RecordKind> {
    match tag {
        tags::MAIN => Some(RecordKind::Main),
        tags::MACROSEISMIC => Some(RecordKind::Macroseismic),
        tags::COMMENT => Some(RecordKind::Comment),
        tags::ERROR => Some(RecordKind::Error),
        tags::WAVEFORM => Some(RecordKind::Waveform),
        tags::PHASE_CAPTION => Some(RecordKind::PhaseCaption),
        tags::INSTRUCTION => Some(RecordKind::Instruction),
        tags::BLANK | tags::PHASE => Some(RecordKind::PhaseData),
        _ => None,
    }
}

/// Classify a single line
pub fn classify(line: &str) -> Result<RecordKind> {
    let tag = tag_of(line).ok_or_else(|| {
        NordicError::malformed_line(RecordKind::PhaseData, TAG_COLUMN + 1, line)
    })?;

    kind_for_tag(tag).ok_or_else(|| NordicError::UnknownRecordKind {
        tag,
        line: line.to_string(),
    })
}

/// Whether a line marks the start of the phase data block
///
/// Lines too short to carry a tag count as phase data, so that the header
/// scan stops there and the line is reported as malformed by the phase
/// extractor instead of being dropped.
pub fn is_phase_line(line: &str) -> bool {
    matches!(tag_of(line), None | Some(tags::BLANK) | Some(tags::PHASE))
}

/// Index of the header/data boundary within a line group
///
/// Every line before the returned index is a header line; every line at or
/// after it is phase data. A group without phase lines is header-only and
/// the index equals the group length.
pub fn header_boundary<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .position(|line| is_phase_line(line.as_ref()))
        .unwrap_or(lines.len())
}
