//! Nordic Ingest Library
//!
//! A Rust library for reading seismic event bulletins in the fixed-width
//! Nordic format into validated, typed events.
//!
//! This library provides tools for:
//! - Classifying record lines by their tag column
//! - Extracting fields from the fixed column tables of every record kind
//! - Correcting common transcription mistakes before validation
//! - Validating fields against bounds, lengths and allowed codes
//! - Assembling header and phase lines into one event per line group
//! - Running whole bulletins, sequentially or on worker threads, with
//!   per-event failure reporting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use nordic_ingest::{BatchProcessor, DetachedResolver, NordicConfig};
//!
//! # fn example() -> nordic_ingest::Result<()> {
//! let processor = BatchProcessor::new(&NordicConfig::default(), Arc::new(DetachedResolver))?;
//! let result = processor.process_file(Path::new("collect.out"))?;
//!
//! println!("{} events, {} failures", result.events.len(), result.failures.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod reader;
pub mod resolver;
pub mod writer;

// Re-export commonly used types
pub use config::NordicConfig;
pub use error::{NordicError, Result};
pub use models::{
    CommentHeader, DayOffset, ErrorHeader, Event, MacroseismicHeader, Magnitude, MainHeader,
    PhaseData, RecordKind, SolutionType, WaveformHeader,
};
pub use parser::EventAssembler;
pub use processor::{BatchProcessor, BatchResult, BatchStats};
pub use reader::{BulletinReader, LineGroup};
pub use resolver::{DetachedResolver, InMemoryRootResolver, RootEventResolver};
pub use writer::format_main_header;
