//! Error handling for Nordic bulletin ingestion.
//!
//! Every variant carries the record kind, the field (where one applies) and the
//! offending raw text, so a failure string alone is enough to find the bad column
//! in the source file.

use crate::models::RecordKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NordicError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed line - {kind}: line is {actual} columns, at least {required} required ({line:?})")]
    MalformedLine {
        kind: RecordKind,
        required: usize,
        actual: usize,
        line: String,
    },

    #[error("Unknown record kind: tag {tag:?} is not a Nordic record type ({line:?})")]
    UnknownRecordKind { tag: char, line: String },

    #[error("Validation Error - {kind}: {field} is not a valid {expected}! ({raw:?})")]
    FieldType {
        kind: RecordKind,
        field: String,
        expected: &'static str,
        raw: String,
    },

    #[error("Validation Error - {kind}: {field} is {bound}! ({value})")]
    Range {
        kind: RecordKind,
        field: String,
        bound: String,
        value: String,
    },

    #[error("Validation Error - {kind}: {field} not in the list of allowed values! ({value:?}) Allowed: {}", .allowed.join(", "))]
    Enum {
        kind: RecordKind,
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Validation Error - {kind}: {field} length {length} is outside {min}..={max}! ({value:?})")]
    Length {
        kind: RecordKind,
        field: String,
        value: String,
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Validation Error - {kind}: {field} is {value} which is not allowed!")]
    NumericDomain {
        kind: RecordKind,
        field: String,
        value: String,
    },

    #[error("Orphan error header: no main header precedes it ({line:?})")]
    OrphanError { line: String },

    #[error("No headers: line group of {lines} lines contains no main header")]
    NoHeaders { lines: usize },

    #[error("Root event resolution failed for native id {native_id}: {reason}")]
    RootResolution { native_id: i64, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl NordicError {
    pub fn malformed_line(kind: RecordKind, required: usize, line: &str) -> Self {
        Self::MalformedLine {
            kind,
            required,
            actual: line.chars().count(),
            line: line.to_string(),
        }
    }

    pub fn field_type(
        kind: RecordKind,
        field: impl Into<String>,
        expected: &'static str,
        raw: impl Into<String>,
    ) -> Self {
        Self::FieldType {
            kind,
            field: field.into(),
            expected,
            raw: raw.into(),
        }
    }

    pub fn range(
        kind: RecordKind,
        field: impl Into<String>,
        bound: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self::Range {
            kind,
            field: field.into(),
            bound: bound.into(),
            value: value.to_string(),
        }
    }

    pub fn root_resolution(native_id: i64, reason: impl Into<String>) -> Self {
        Self::RootResolution {
            native_id,
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Short taxonomy name, used for failure tallies
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "Io",
            Self::MalformedLine { .. } => "MalformedLine",
            Self::UnknownRecordKind { .. } => "UnknownRecordKind",
            Self::FieldType { .. } => "FieldTypeError",
            Self::Range { .. } => "RangeError",
            Self::Enum { .. } => "EnumError",
            Self::Length { .. } => "LengthError",
            Self::NumericDomain { .. } => "NumericDomainError",
            Self::OrphanError { .. } => "OrphanError",
            Self::NoHeaders { .. } => "NoHeaders",
            Self::RootResolution { .. } => "RootResolution",
            Self::Configuration { .. } => "Configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, NordicError>;
