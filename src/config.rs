//! Configuration management and validation.
//!
//! Provides the settings that change how a bulletin is read: whether the
//! correction pass runs, how tolerant the line reader is, which solution type
//! the batch is tagged with and how many workers the parallel driver uses.

use crate::error::{NordicError, Result};
use crate::models::SolutionType;
use serde::{Deserialize, Serialize};

/// Global configuration for bulletin ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NordicConfig {
    /// Run the correction pass on extracted fields before validation
    pub apply_fixes: bool,

    /// Right-pad lines shorter than the record width instead of rejecting them
    pub pad_short_lines: bool,

    /// Solution type assigned to every event in the batch
    pub solution_type: SolutionType,

    /// Number of line groups assembled concurrently by the parallel driver
    pub workers: usize,
}

impl Default for NordicConfig {
    fn default() -> Self {
        Self {
            apply_fixes: true,
            pad_short_lines: false,
            solution_type: SolutionType::Other,
            workers: num_cpus::get(),
        }
    }
}

impl NordicConfig {
    /// Disable the correction pass
    pub fn without_fixes(mut self) -> Self {
        self.apply_fixes = false;
        self
    }

    /// Pad short lines to the record width while reading
    pub fn with_padding(mut self) -> Self {
        self.pad_short_lines = true;
        self
    }

    /// Create configuration with a custom solution type
    pub fn with_solution_type(mut self, solution_type: SolutionType) -> Self {
        self.solution_type = solution_type;
        self
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(NordicError::configuration("workers must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NordicConfig::default();
        assert!(config.apply_fixes);
        assert!(!config.pad_short_lines);
        assert_eq!(config.solution_type, SolutionType::Other);
        assert!(config.workers >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = NordicConfig::default()
            .without_fixes()
            .with_padding()
            .with_solution_type(SolutionType::Final)
            .with_workers(2);

        assert!(!config.apply_fixes);
        assert!(config.pad_short_lines);
        assert_eq!(config.solution_type, SolutionType::Final);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = NordicConfig::default().with_workers(0);
        assert!(matches!(
            config.validate(),
            Err(NordicError::Configuration { .. })
        ));
    }
}
