//! Correctness checking of normalized output against the reference formula

use crate::types::{SAMPLE_MAX, TOLERANCE};

/// One output element that disagrees with `input / 255.0` beyond [`TOLERANCE`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub expected: f64,
    pub actual: f64,
}

impl Mismatch {
    #[inline]
    #[must_use]
    pub fn deviation(&self) -> f64 {
        (self.actual - self.expected).abs()
    }
}

/// Result of a correctness check: every mismatching element, in index order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectnessReport {
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl CorrectnessReport {
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    #[must_use]
    pub fn failed_indices(&self) -> Vec<usize> {
        self.mismatches.iter().map(|m| m.index).collect()
    }
}

/// Compare the first `size` elements of `output` with `input[i] / 255.0`
///
/// Every element is checked; a mismatch never stops the scan. Mismatches are
/// returned as data, not errors, and each is traced at `debug` level; reporting
/// them to the user is left to the caller.
/// `size == 0` passes trivially.
///
/// # Panics
///
/// Panics if either slice is shorter than `size`.
#[must_use]
pub fn check(input: &[u8], output: &[f64], size: usize) -> CorrectnessReport {
    let mismatches: Vec<Mismatch> = input[..size]
        .iter()
        .zip(&output[..size])
        .enumerate()
        .filter_map(|(index, (&sample, &actual))| {
            let expected = f64::from(sample) / SAMPLE_MAX;
            let diff = (actual - expected).abs();
            // NaN output must fail too, hence the negated comparison
            if diff <= TOLERANCE {
                return None;
            }
            tracing::debug!(index, expected, actual, "normalized value out of tolerance");
            Some(Mismatch {
                index,
                expected,
                actual,
            })
        })
        .collect();

    CorrectnessReport {
        checked: size,
        mismatches,
    }
}
