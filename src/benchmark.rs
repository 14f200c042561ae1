//! Benchmark harness for the normalization kernel
//!
//! For each problem size the harness generates one random input, checks a single
//! kernel invocation with [`crate::verify::check`], then times `num_runs` further
//! invocations on the same input. Test cases run strictly one after another, and a
//! failed correctness check never stops the remaining cases.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BenchmarkConfig, ConfigError};
use crate::types::{Dimensions, GrayImage};
use crate::verify::{self, CorrectnessReport};

/// Outcome of one test case
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub height: usize,
    pub width: usize,
    pub size: usize,
    pub correctness_passed: bool,
    pub mismatch_count: usize,
    pub num_runs: usize,
    pub average_latency_secs: f64,
    pub per_element_latency_secs: f64,
}

impl BenchmarkResult {
    fn new(dims: Dimensions, report: &CorrectnessReport, num_runs: usize, total: Duration) -> Self {
        let size = dims.pixel_count();
        let average_latency_secs = total.as_secs_f64() / num_runs as f64;
        Self {
            height: dims.height,
            width: dims.width,
            size,
            correctness_passed: report.passed(),
            mismatch_count: report.mismatches.len(),
            num_runs,
            average_latency_secs,
            per_element_latency_secs: average_latency_secs / size as f64,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.height, self.width)
    }
}

/// Kernel signature the harness measures: fill `out` from the image samples
pub type KernelFn = fn(&GrayImage, &mut [f64]);

/// Drives a normalization kernel over randomly generated inputs
///
/// The random generator is owned by the harness and seeded once, so every test
/// case in a run draws from the same stream. Kernels write into an output buffer
/// the harness allocates once per test case, so timed calls never include
/// allocation.
pub struct BenchmarkHarness<K, R> {
    kernel: K,
    rng: R,
}

impl BenchmarkHarness<KernelFn, StdRng> {
    /// Harness over the default lane kernel with a seeded generator
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_kernel(GrayImage::normalize_into, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.resolve_seed())
    }
}

impl<K, R> BenchmarkHarness<K, R>
where
    K: FnMut(&GrayImage, &mut [f64]),
    R: Rng,
{
    pub fn with_kernel(kernel: K, rng: R) -> Self {
        Self { kernel, rng }
    }

    /// Fill a fresh image of the given size with uniform samples in `[0, 255]`
    pub fn generate_input(&mut self, dims: Dimensions) -> GrayImage {
        let mut samples = vec![0u8; dims.pixel_count()];
        self.rng.fill(samples.as_mut_slice());
        GrayImage::from_parts(dims, samples)
    }

    /// Run one test case on a caller-supplied input
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroRuns`] if `num_runs` is zero; the kernel is not
    /// invoked in that case.
    pub fn measure(
        &mut self,
        input: &GrayImage,
        num_runs: usize,
    ) -> Result<BenchmarkResult, ConfigError> {
        if num_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        let dims = input.dimensions();
        let mut output = vec![0.0_f64; dims.pixel_count()];

        (self.kernel)(input, output.as_mut_slice());
        let report = verify::check(input.samples(), &output, dims.pixel_count());

        if !report.passed() {
            tracing::warn!(
                size = %dims,
                mismatches = report.mismatches.len(),
                "correctness check failed"
            );
        }

        let mut total = Duration::ZERO;
        for _ in 0..num_runs {
            let start = Instant::now();
            (self.kernel)(black_box(input), black_box(output.as_mut_slice()));
            total += start.elapsed();
        }

        let result = BenchmarkResult::new(dims, &report, num_runs, total);
        tracing::debug!(
            size = %dims,
            passed = result.correctness_passed,
            avg_secs = result.average_latency_secs,
            "test case finished"
        );
        Ok(result)
    }

    /// Generate an input of the given size and measure it
    ///
    /// # Errors
    ///
    /// See [`Self::measure`].
    pub fn run_case(
        &mut self,
        dims: Dimensions,
        num_runs: usize,
    ) -> Result<BenchmarkResult, ConfigError> {
        if num_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        let input = self.generate_input(dims);
        self.measure(&input, num_runs)
    }

    /// Run every size in order, handing each result to `on_result` as it completes
    ///
    /// # Errors
    ///
    /// Returns an error if `num_runs` is zero or a size is out of range; nothing is
    /// measured in that case.
    pub fn run_with<F>(
        &mut self,
        sizes: &[Dimensions],
        num_runs: usize,
        mut on_result: F,
    ) -> Result<Vec<BenchmarkResult>, ConfigError>
    where
        F: FnMut(&BenchmarkResult),
    {
        if num_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        if let Some(&bad) = sizes.iter().find(|d| !d.is_valid()) {
            return Err(ConfigError::InvalidSize(bad));
        }

        tracing::info!(cases = sizes.len(), num_runs, "starting benchmark");
        let mut results = Vec::with_capacity(sizes.len());
        for &dims in sizes {
            let result = self.run_case(dims, num_runs)?;
            on_result(&result);
            results.push(result);
        }
        Ok(results)
    }

    /// # Errors
    ///
    /// See [`Self::run_with`].
    pub fn run(
        &mut self,
        sizes: &[Dimensions],
        num_runs: usize,
    ) -> Result<Vec<BenchmarkResult>, ConfigError> {
        self.run_with(sizes, num_runs, |_| {})
    }

    /// # Errors
    ///
    /// Returns the error from [`BenchmarkConfig::validate`].
    pub fn run_config<F>(
        &mut self,
        config: &BenchmarkConfig,
        on_result: F,
    ) -> Result<Vec<BenchmarkResult>, ConfigError>
    where
        F: FnMut(&BenchmarkResult),
    {
        config.validate()?;
        self.run_with(&config.sizes, config.num_runs, on_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::normalize_scalar_into;
    use assert_matches::assert_matches;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_same_seed_same_inputs() {
        let mut a = BenchmarkHarness::new(42);
        let mut b = BenchmarkHarness::new(42);
        let dims = Dimensions::new(8, 8);
        assert_eq!(a.generate_input(dims), b.generate_input(dims));
    }

    #[test]
    fn test_generator_not_reseeded_between_cases() {
        let mut harness = BenchmarkHarness::new(1);
        let dims = Dimensions::new(16, 16);
        let first = harness.generate_input(dims);
        let second = harness.generate_input(dims);
        assert_ne!(first, second);
    }

    #[test]
    fn test_zero_runs_rejected_before_any_invocation() {
        let calls = Cell::new(0usize);
        let mut harness = BenchmarkHarness::with_kernel(
            |image: &GrayImage, out: &mut [f64]| {
                calls.set(calls.get() + 1);
                image.normalize_into(out);
            },
            StdRng::seed_from_u64(0),
        );
        let result = harness.run(&[Dimensions::new(2, 2)], 0);
        assert_matches!(result, Err(ConfigError::ZeroRuns));

        let input = GrayImage::zeros(Dimensions::new(2, 2));
        assert_matches!(harness.measure(&input, 0), Err(ConfigError::ZeroRuns));
        assert_matches!(
            harness.run_case(Dimensions::new(2, 2), 0),
            Err(ConfigError::ZeroRuns)
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_timed_runs_reuse_one_output_buffer() {
        let buffers = RefCell::new(Vec::new());
        let mut harness = BenchmarkHarness::with_kernel(
            |image: &GrayImage, out: &mut [f64]| {
                buffers.borrow_mut().push(out.as_ptr() as usize);
                image.normalize_into(out);
            },
            StdRng::seed_from_u64(4),
        );
        let result = harness.run_case(Dimensions::new(64, 64), 6).unwrap();
        assert!(result.correctness_passed);
        drop(harness);

        let buffers = buffers.into_inner();
        assert_eq!(buffers.len(), 1 + 6);
        assert!(buffers.iter().all(|&ptr| ptr == buffers[0]));
    }

    #[test]
    fn test_invalid_size_rejected() {
        let mut harness = BenchmarkHarness::new(0);
        let result = harness.run(&[Dimensions::new(0, 5)], 3);
        assert_matches!(result, Err(ConfigError::InvalidSize(_)));
    }

    #[test]
    fn test_broken_kernel_reported_without_aborting() {
        let broken = |_: &GrayImage, out: &mut [f64]| out.fill(2.0);
        let mut harness = BenchmarkHarness::with_kernel(broken, StdRng::seed_from_u64(3));
        let sizes = [Dimensions::new(3, 3), Dimensions::new(4, 4)];
        let results = harness.run(&sizes, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.correctness_passed));
        assert_eq!(results[0].mismatch_count, 9);
        assert_eq!(results[1].mismatch_count, 16);
    }

    #[test]
    fn test_scalar_kernel_passes() {
        let scalar =
            |image: &GrayImage, out: &mut [f64]| normalize_scalar_into(image.samples(), out);
        let mut harness = BenchmarkHarness::with_kernel(scalar, StdRng::seed_from_u64(9));
        let result = harness.run_case(Dimensions::new(31, 17), 3).unwrap();
        assert!(result.correctness_passed);
        assert_eq!(result.size, 31 * 17);
        assert_eq!(result.num_runs, 3);
    }

    #[test]
    fn test_per_element_latency_is_average_over_size() {
        let mut harness = BenchmarkHarness::new(5);
        let result = harness.run_case(Dimensions::new(20, 10), 4).unwrap();
        let expected = result.average_latency_secs / 200.0;
        assert!((result.per_element_latency_secs - expected).abs() <= f64::EPSILON);
        assert_eq!(result.dimensions(), Dimensions::new(20, 10));
    }

    #[test]
    fn test_run_config_streams_results() {
        let config = BenchmarkConfig {
            sizes: vec![Dimensions::new(2, 3), Dimensions::new(5, 5)],
            num_runs: 2,
            seed: Some(11),
        };
        let mut seen = Vec::new();
        let mut harness = BenchmarkHarness::from_config(&config);
        let results = harness
            .run_config(&config, |r| seen.push(r.dimensions()))
            .unwrap();
        assert_eq!(seen, config.sizes);
        assert_eq!(results.len(), 2);
    }
}
