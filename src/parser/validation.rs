//! Typed conversion and validation of extracted fields
//!
//! Each validator turns one trimmed field into an optional typed value:
//! blank text is `Ok(None)`, well-formed text within its constraints is
//! `Ok(Some(value))`, and everything else is a structured error naming the
//! record kind, the field and the offending text.

use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::error::{NordicError, Result};
use crate::models::RecordKind;

/// A field value that is either still source text or already typed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a, T> {
    Raw(&'a str),
    Typed(T),
}

impl<'a, T> From<&'a str> for FieldValue<'a, T> {
    fn from(raw: &'a str) -> Self {
        FieldValue::Raw(raw)
    }
}

impl<'a, T> From<&'a String> for FieldValue<'a, T> {
    fn from(raw: &'a String) -> Self {
        FieldValue::Raw(raw.as_str())
    }
}

/// Validate an integer field against optional inclusive bounds
pub fn validate_integer<'a, N>(
    value: impl Into<FieldValue<'a, N>>,
    name: &str,
    low: Option<N>,
    high: Option<N>,
    kind: RecordKind,
) -> Result<Option<N>>
where
    N: FromStr + PartialOrd + Copy + fmt::Display,
{
    let number = match value.into() {
        FieldValue::Typed(number) => number,
        FieldValue::Raw(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<N>()
                .map_err(|_| NordicError::field_type(kind, name, "integer", raw))?
        }
    };

    check_bounds(number, name, low, high, kind)?;
    Ok(Some(number))
}

/// Validate a floating point field, rejecting NaN and infinities outright
pub fn validate_float<'a>(
    value: impl Into<FieldValue<'a, f64>>,
    name: &str,
    low: Option<f64>,
    high: Option<f64>,
    kind: RecordKind,
) -> Result<Option<f64>> {
    let number = match value.into() {
        FieldValue::Typed(number) => number,
        FieldValue::Raw(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<f64>()
                .map_err(|_| NordicError::field_type(kind, name, "float", raw))?
        }
    };

    if !number.is_finite() {
        return Err(NordicError::NumericDomain {
            kind,
            field: name.to_string(),
            value: number.to_string(),
        });
    }

    check_bounds(number, name, low, high, kind)?;
    Ok(Some(number))
}

fn check_bounds<N>(
    value: N,
    name: &str,
    low: Option<N>,
    high: Option<N>,
    kind: RecordKind,
) -> Result<()>
where
    N: PartialOrd + Copy + fmt::Display,
{
    if let Some(low) = low {
        if value < low {
            return Err(NordicError::range(
                kind,
                name,
                format!("smaller than {}", low),
                value,
            ));
        }
    }
    if let Some(high) = high {
        if value > high {
            return Err(NordicError::range(
                kind,
                name,
                format!("larger than {}", high),
                value,
            ));
        }
    }
    Ok(())
}

/// Validate a free or enumerated string field
pub fn validate_string(
    value: &str,
    name: &str,
    min_len: usize,
    max_len: usize,
    allowed: Option<&[&str]>,
    kind: RecordKind,
) -> Result<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if let Some(allowed) = allowed {
        if !allowed.contains(&value) {
            return Err(NordicError::Enum {
                kind,
                field: name.to_string(),
                value: value.to_string(),
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            });
        }
    }

    let length = value.chars().count();
    if length < min_len || length > max_len {
        return Err(NordicError::Length {
            kind,
            field: name.to_string(),
            value: value.to_string(),
            length,
            min: min_len,
            max: max_len,
        });
    }

    Ok(Some(value.to_string()))
}

/// Validate a single-character code field
pub fn validate_code(
    value: &str,
    name: &str,
    allowed: Option<&[char]>,
    kind: RecordKind,
) -> Result<Option<char>> {
    let Some(code) = validate_string(value, name, 1, 1, None, kind)? else {
        return Ok(None);
    };
    // Length was checked above
    let code = code.chars().next().unwrap_or_default();

    if let Some(allowed) = allowed {
        if !allowed.contains(&code) {
            return Err(NordicError::Enum {
                kind,
                field: name.to_string(),
                value: code.to_string(),
                allowed: allowed.iter().map(|c| c.to_string()).collect(),
            });
        }
    }

    Ok(Some(code))
}

/// Validate a "YYYY MMDD" or "YYYY-MM-DD" shaped date
pub fn validate_date<'a>(
    value: impl Into<FieldValue<'a, NaiveDate>>,
    name: &str,
    kind: RecordKind,
) -> Result<Option<NaiveDate>> {
    match value.into() {
        FieldValue::Typed(date) => Ok(Some(date)),
        FieldValue::Raw(raw) => {
            if raw.trim().is_empty() {
                return Ok(None);
            }
            parse_date(raw)
                .map(Some)
                .ok_or_else(|| NordicError::field_type(kind, name, "date", raw))
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let year = raw.get(..4)?.trim().parse::<i32>().ok()?;
    let month = raw.get(5..7)?.trim().parse::<u32>().ok()?;
    let day = raw
        .get(7..)
        .and_then(|day| day.trim().parse::<u32>().ok())
        .or_else(|| raw.get(8..).and_then(|day| day.trim().parse::<u32>().ok()))?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Validate a "HHMM SS.ss" or "HHMMSS.ss" shaped time of day
pub fn validate_time<'a>(
    value: impl Into<FieldValue<'a, NaiveTime>>,
    name: &str,
    kind: RecordKind,
) -> Result<Option<NaiveTime>> {
    match value.into() {
        FieldValue::Typed(time) => Ok(Some(time)),
        FieldValue::Raw(raw) => {
            if raw.trim().is_empty() {
                return Ok(None);
            }
            parse_time(raw, name, kind).map(Some)
        }
    }
}

/// Split a "HHMM SS.ss" time into hour, minute and seconds text
pub fn split_time(raw: &str) -> Option<(&str, &str, &str)> {
    Some((raw.get(..2)?, raw.get(2..4)?, raw.get(4..)?))
}

/// Parse the time text; malformed text is a type error, a well-formed but
/// impossible hour, minute or second is a range error
fn parse_time(raw: &str, name: &str, kind: RecordKind) -> Result<NaiveTime> {
    let type_error = || NordicError::field_type(kind, name, "time", raw);
    let number = |text: &str| text.trim().parse::<u32>().map_err(|_| type_error());

    let (hour, minute, seconds) = split_time(raw).ok_or_else(type_error)?;
    let hour = number(hour)?;
    let minute = number(minute)?;

    let seconds = seconds.trim();
    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    let second = if whole.is_empty() { 0 } else { number(whole)? };
    let nanos = scale_fraction(fraction).ok_or_else(type_error)?;

    check_bounds(hour, &format!("{} hour", name), Some(0), Some(23), kind)?;
    check_bounds(minute, &format!("{} minute", name), Some(0), Some(59), kind)?;
    check_bounds(second, &format!("{} second", name), Some(0), Some(59), kind)?;

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(type_error)
}

/// Scale fractional-second digits to nanoseconds ("34" -> 340_000_000)
fn scale_fraction(fraction: &str) -> Option<u32> {
    if fraction.is_empty() {
        return Some(0);
    }
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = fraction.parse::<u32>().ok()?;
    Some(digits * 10u32.pow(9 - fraction.len() as u32))
}
