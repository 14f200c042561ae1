mod grayscale;
mod normalization;

pub use grayscale::{convert_grayscale, convert_grayscale_scalar, normalize};
pub use normalization::{LANES, normalize_lanes_into, normalize_sample, normalize_scalar_into};

use crate::types::{GrayImage, NormalizedImage};

impl GrayImage {
    /// Normalize this image into a freshly allocated grid of values in `[0.0, 1.0]`
    #[must_use]
    pub fn normalize(&self) -> NormalizedImage {
        convert_grayscale(self)
    }

    /// Normalize into a caller-owned buffer with the lane kernel
    ///
    /// Lets a caller reuse one output buffer across calls.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` differs from the pixel count.
    pub fn normalize_into(&self, out: &mut [f64]) {
        assert_eq!(out.len(), self.samples().len(), "output buffer size mismatch");
        normalize_lanes_into(self.samples(), out);
    }
}
