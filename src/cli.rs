use clap::Parser;
use std::path::PathBuf;

use crate::config::{BenchmarkConfig, DEFAULT_NUM_RUNS, DEFAULT_SIZES};
use crate::types::Dimensions;

/// Grayscale u8 -> f64 image conversion with correctness and performance checks
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Read the demo image from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Skip the demo conversion and run only the performance tests
    #[arg(long, conflicts_with = "input")]
    pub skip_demo: bool,

    /// Benchmark problem size as HEIGHTxWIDTH (repeatable)
    #[arg(short, long = "size", value_name = "HxW")]
    pub sizes: Vec<Dimensions>,

    /// Timed runs per problem size
    #[arg(short, long, default_value_t = DEFAULT_NUM_RUNS)]
    pub runs: usize,

    /// Seed for the random input generator (defaults to the current time)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    #[must_use]
    pub fn benchmark_config(&self) -> BenchmarkConfig {
        let sizes = if self.sizes.is_empty() {
            DEFAULT_SIZES.to_vec()
        } else {
            self.sizes.clone()
        };
        BenchmarkConfig {
            sizes,
            num_runs: self.runs,
            seed: self.seed,
        }
    }
}
