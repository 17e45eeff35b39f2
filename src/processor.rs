//! Batch driver for whole bulletins.
//!
//! Feeds every line group of a bulletin to the [`EventAssembler`] and sorts
//! the outcome into events and failure messages. A failing group never stops
//! the batch, and every group lands in exactly one of the two lists.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info, warn};

use crate::config::NordicConfig;
use crate::error::{NordicError, Result};
use crate::models::Event;
use crate::parser::EventAssembler;
use crate::reader::{BulletinReader, LineGroup};
use crate::resolver::RootEventResolver;

/// Counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Line groups handed to the assembler
    pub groups: usize,

    /// Events assembled successfully
    pub events: usize,

    /// Groups that failed
    pub failures: usize,

    /// Phase data records across all successful events
    pub phase_lines: usize,

    /// Failed groups per error category
    pub failure_categories: BTreeMap<String, usize>,

    /// Wall time of the run in milliseconds
    pub processing_time_ms: u128,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_event(&mut self, event: &Event) {
        self.groups += 1;
        self.events += 1;
        self.phase_lines += event.phase_data.len();
    }

    fn record_failure(&mut self, category: &str) {
        self.groups += 1;
        self.failures += 1;
        *self
            .failure_categories
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.groups == 0 {
            0.0
        } else {
            (self.events as f64 / self.groups as f64) * 100.0
        }
    }

    /// Check that no group failed
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

/// Outcome of one batch run, in group order
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Successfully assembled events
    pub events: Vec<Event>,

    /// One formatted message per failed group
    pub failures: Vec<String>,

    pub stats: BatchStats,
}

impl BatchResult {
    fn push(&mut self, index: usize, outcome: Result<Event>) {
        match outcome {
            Ok(event) => {
                self.stats.record_event(&event);
                self.events.push(event);
            }
            Err(error) => self.push_failure(index, error.category(), &error),
        }
    }

    fn push_failure(&mut self, index: usize, category: &str, error: &dyn std::fmt::Display) {
        let message = format_failure(index, error);
        warn!("{}", message);
        self.stats.record_failure(category);
        self.failures.push(message);
    }
}

/// Failure message for the group at `index` (0-based), numbered from 1
pub fn format_failure(index: usize, error: &dyn std::fmt::Display) -> String {
    format!("Event {}: {}", index + 1, error)
}

/// Runs the assembler over line groups and collects the results
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    assembler: EventAssembler,
    reader: BulletinReader,
    workers: usize,
}

impl BatchProcessor {
    /// Create a processor from validated configuration
    pub fn new(config: &NordicConfig, resolver: Arc<dyn RootEventResolver>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            assembler: EventAssembler::from_config(config, resolver),
            reader: BulletinReader::new(config),
            workers: config.workers,
        })
    }

    /// Assemble every group in order on the calling thread
    pub fn process_groups<S: AsRef<str>>(&self, groups: &[Vec<S>]) -> BatchResult {
        let start_time = Instant::now();
        let mut result = BatchResult::default();

        for (index, group) in groups.iter().enumerate() {
            debug!("Assembling group {} ({} lines)", index + 1, group.len());
            result.push(index, self.assembler.assemble(group));
        }

        result.stats.processing_time_ms = start_time.elapsed().as_millis();
        log_summary(&result.stats);
        result
    }

    /// Assemble groups on blocking worker threads, keeping group order
    ///
    /// Produces the same events and failures as [`Self::process_groups`].
    pub async fn process_groups_parallel(&self, groups: Vec<LineGroup>) -> BatchResult {
        let start_time = Instant::now();
        let total = groups.len();

        let outcomes = stream::iter(groups.into_iter().enumerate())
            .map(|(index, group)| {
                let assembler = self.assembler.clone();
                async move {
                    let outcome = task::spawn_blocking(move || assembler.assemble(&group)).await;
                    (index, outcome)
                }
            })
            .buffered(self.workers.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut result = BatchResult::default();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(outcome) => result.push(index, outcome),
                Err(join_error) => {
                    result.push_failure(index, "WorkerFailure", &join_error);
                }
            }
        }

        debug!("Parallel run over {} groups with {} workers", total, self.workers);
        result.stats.processing_time_ms = start_time.elapsed().as_millis();
        log_summary(&result.stats);
        result
    }

    /// Read a bulletin and assemble its groups sequentially
    pub fn process_file(&self, path: &Path) -> Result<BatchResult> {
        info!("Processing bulletin: {}", path.display());
        let groups = self.reader.read_file(path)?;
        Ok(self.process_groups(&groups))
    }

    /// Read a bulletin and assemble its groups in parallel
    pub async fn process_file_parallel(&self, path: &Path) -> Result<BatchResult> {
        info!("Processing bulletin: {}", path.display());
        let reader = self.reader.clone();
        let owned = path.to_path_buf();
        let groups = task::spawn_blocking(move || reader.read_file(&owned))
            .await
            .map_err(|e| NordicError::Io(std::io::Error::other(e)))??;
        Ok(self.process_groups_parallel(groups).await)
    }
}

fn log_summary(stats: &BatchStats) {
    info!(
        "Assembled {} of {} groups ({:.1}%), {} phase lines, {} failures in {}ms",
        stats.events,
        stats.groups,
        stats.success_rate(),
        stats.phase_lines,
        stats.failures,
        stats.processing_time_ms
    );
}
