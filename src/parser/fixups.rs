//! Correction pass for common transcription mistakes
//!
//! Runs on extracted but still untyped fields, before validation. Every rule
//! is idempotent and only touches the fields named in its documentation;
//! add new corrections here as new rules rather than loosening validators.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::extractor::{RawError, RawMain, RawPhase};
use super::validation::{parse_date, split_time};
use crate::constants::FIXED_DEPTH;
use crate::models::DayOffset;

/// Apply all main header rules
pub fn fix_main(raw: &mut RawMain) {
    roll_origin_second(raw);
    clear_orphan_magnitude_codes(raw);
}

/// Apply all error header rules, given the depth control of the bound main header
pub fn fix_error(raw: &mut RawError, depth_control: &str) {
    clear_fixed_depth_error(raw, depth_control);
}

/// Apply all phase data rules
pub fn fix_phase(raw: &mut RawPhase) {
    carry_phase_time(raw);
    apply_day_offset(raw);
}

/// A 60.0 origin second rolls into the next minute.
///
/// Touches `origin_second`, `origin_minute`, and `origin_hour` / `origin_date`
/// only when the carry reaches them.
pub fn roll_origin_second(raw: &mut RawMain) {
    let Ok(second) = raw.origin_second.parse::<f64>() else {
        return;
    };
    if !(60.0..120.0).contains(&second) {
        return;
    }
    let (Ok(mut minute), Ok(mut hour)) = (
        raw.origin_minute.parse::<u32>(),
        raw.origin_hour.parse::<u32>(),
    ) else {
        return;
    };

    minute += 1;
    if minute >= 60 {
        minute -= 60;
        hour += 1;
    }
    if hour >= 24 {
        // Without a readable date the day cannot be carried
        let Some(next) = parse_date(&raw.origin_date).and_then(|day| day.succ_opt()) else {
            return;
        };
        hour -= 24;
        raw.origin_date = format_date(next);
    }

    debug!(
        "Rolled origin second {} into {:02}:{:02}",
        raw.origin_second, hour, minute
    );
    raw.origin_second = format!("{:.1}", second - 60.0);
    raw.origin_minute = format!("{:02}", minute);
    raw.origin_hour = format!("{:02}", hour);
}

/// A magnitude type or agency without a magnitude value is dropped.
///
/// Touches `magnitude_type` and `reporting_agency` of each magnitude triple.
pub fn clear_orphan_magnitude_codes(raw: &mut RawMain) {
    for magnitude in raw.magnitudes.iter_mut() {
        if magnitude.value.is_empty() {
            magnitude.magnitude_type.clear();
            magnitude.reporting_agency.clear();
        }
    }
}

/// A fixed depth has no genuine error estimate.
///
/// Touches `depth_error` only.
pub fn clear_fixed_depth_error(raw: &mut RawError, depth_control: &str) {
    let fixed = depth_control
        .chars()
        .next()
        .is_some_and(|code| code == FIXED_DEPTH);
    if fixed && !raw.depth_error.is_empty() {
        debug!("Clearing depth error {} of fixed depth", raw.depth_error);
        raw.depth_error.clear();
    }
}

/// Seconds past 59, minutes past 59 and hours past 23 carry into the next
/// unit, with whole days moved onto the reference date.
///
/// Touches `observation_time` and `reference_date`.
pub fn carry_phase_time(raw: &mut RawPhase) {
    let Some((hour, minute, seconds)) = split_time(&raw.observation_time) else {
        return;
    };
    let seconds = seconds.trim();
    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    let (Ok(mut hour), Ok(mut minute), Ok(mut second)) = (
        hour.trim().parse::<u32>(),
        minute.trim().parse::<u32>(),
        if whole.is_empty() {
            Ok(0)
        } else {
            whole.parse::<u32>()
        },
    ) else {
        return;
    };
    if second < 60 && minute < 60 && hour < 24 {
        return;
    }

    minute += second / 60;
    second %= 60;
    hour += minute / 60;
    minute %= 60;
    let days = hour / 24;
    hour %= 24;

    if days > 0 {
        let Some(date) = raw.reference_date else {
            return;
        };
        raw.reference_date = date.checked_add_signed(Duration::days(i64::from(days)));
    }

    let fraction = if fraction.is_empty() {
        String::new()
    } else {
        format!(".{}", fraction)
    };
    let carried = format!("{:02}{:02} {:02}{}", hour, minute, second, fraction);
    debug!(
        "Carried phase time {:?} into {:?} (+{} days)",
        raw.observation_time, carried, days
    );
    raw.observation_time = carried;
}

/// Fold a `+` / `-` day offset indicator into the reference date once.
///
/// Touches `reference_date` and `day_offset_applied`.
pub fn apply_day_offset(raw: &mut RawPhase) {
    if raw.day_offset_applied {
        return;
    }
    let days = DayOffset::from_code(raw.time_info.chars().next()).days();
    if days == 0 {
        return;
    }
    let Some(date) = raw.reference_date else {
        return;
    };

    raw.reference_date = date.checked_add_signed(Duration::days(days));
    raw.day_offset_applied = true;
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y %m%d").to_string()
}
