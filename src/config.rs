//! Benchmark configuration

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::Dimensions;

/// Problem sizes measured when none are given
pub const DEFAULT_SIZES: [Dimensions; 3] = [
    Dimensions::new(10, 10),
    Dimensions::new(100, 100),
    Dimensions::new(1000, 1000),
];

/// Timed runs per problem size when none is given
pub const DEFAULT_NUM_RUNS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one benchmark size is required")]
    NoSizes,

    #[error("number of runs must be at least 1")]
    ZeroRuns,

    #[error("benchmark size {0} out of range (1..=10000 per side)")]
    InvalidSize(Dimensions),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    pub sizes: Vec<Dimensions>,
    pub num_runs: usize,
    /// Seed for the input generator; wall-clock derived when `None`
    pub seed: Option<u64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            num_runs: DEFAULT_NUM_RUNS,
            seed: None,
        }
    }
}

impl BenchmarkConfig {
    /// # Errors
    ///
    /// Returns an error for an empty size list, zero runs, or an out-of-range size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::NoSizes);
        }
        if self.num_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        if let Some(&bad) = self.sizes.iter().find(|d| !d.is_valid()) {
            return Err(ConfigError::InvalidSize(bad));
        }
        Ok(())
    }

    /// The configured seed, or one taken from the wall clock
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

/// Seconds since the Unix epoch, or 0 if the clock is before it
#[must_use]
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
