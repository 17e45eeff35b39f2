//! Nordic bulletin parser
//!
//! Turns one group of fixed-width lines into a validated [`Event`](crate::models::Event).
//!
//! ## Architecture
//!
//! The pipeline runs in this order for every line:
//! - [`classifier`] - Record kind from the tag column, header/data boundary
//! - [`extractor`] - Fixed-column slicing into raw, untyped records
//! - [`fixups`] - Optional correction of common transcription mistakes
//! - [`validation`] - Typed conversion with bounds and allowed codes
//! - [`convert`] - Per record kind field tables for the validators
//! - [`assembler`] - State machine binding the records into one event
//!
//! ## Usage
//!
//! ```rust
//! use nordic_ingest::parser::EventAssembler;
//!
//! let main = format!("{:<79}1", " 2019 0502 1305 12.3L   60.170  24.940 10.0  HEL 12 0.5 3.4LHEL");
//! let phase = format!("{:<80}", " HEL  SZ IP       1305 18.45");
//! let event = EventAssembler::default().assemble(&[main, phase]).unwrap();
//! assert_eq!(event.phase_data.len(), 1);
//! ```

pub mod assembler;
pub mod classifier;
pub mod convert;
pub mod extractor;
pub mod fixups;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use assembler::{AssemblyState, EventAssembler};
pub use classifier::{classify, header_boundary, is_phase_line};
pub use extractor::extract;
pub use validation::FieldValue;
