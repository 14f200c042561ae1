//! Grayscale sample normalization
//!
//! Converts 8-bit grayscale samples into `f64` values in `[0.0, 1.0]` by dividing
//! every sample by 255.0. Samples are `u8`, so the `[0, 255]` input range is
//! guaranteed by type; the caller is responsible for dimension validation.

use super::normalization::{normalize_lanes_into, normalize_scalar_into};
use crate::types::{GrayImage, NormalizedImage};

/// Normalize a row-major `height x width` sample buffer into a fresh `f64` buffer
///
/// `output[i] == samples[i] as f64 / 255.0` for every linear index `i`, so element
/// `(r, c)` sits at `r * width + c` in both buffers.
///
/// # Panics
///
/// Panics if `samples.len() < height * width`. Dimensions are a caller
/// precondition and are not otherwise checked here.
#[must_use]
pub fn normalize(height: usize, width: usize, samples: &[u8]) -> Vec<f64> {
    let size = height * width;
    let samples = &samples[..size];
    let mut out = vec![0.0_f64; size];
    normalize_lanes_into(samples, &mut out);
    out
}

/// Convert a grayscale image using the lane kernel
#[must_use]
pub fn convert_grayscale(image: &GrayImage) -> NormalizedImage {
    convert_with(image, normalize_lanes_into)
}

/// Convert a grayscale image one sample at a time
///
/// Reference implementation for the lane kernel; both produce identical bits.
#[must_use]
pub fn convert_grayscale_scalar(image: &GrayImage) -> NormalizedImage {
    convert_with(image, normalize_scalar_into)
}

fn convert_with(image: &GrayImage, kernel: fn(&[u8], &mut [f64])) -> NormalizedImage {
    let dimensions = image.dimensions();
    let mut out = vec![0.0_f64; dimensions.pixel_count()];
    kernel(image.samples(), &mut out);
    NormalizedImage::from_parts(dimensions, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimensions;
    use approx::assert_abs_diff_eq;

    fn ramp(dims: Dimensions) -> GrayImage {
        let samples = (0..dims.pixel_count()).map(|i| (i % 256) as u8).collect();
        GrayImage::from_raw(dims, samples).unwrap()
    }

    #[test]
    fn test_every_sample_maps_to_its_quotient() {
        let samples: Vec<u8> = (0..=255).collect();
        let out = normalize(16, 16, &samples);
        for (s, v) in samples.iter().zip(&out) {
            assert_abs_diff_eq!(*v, f64::from(*s) / 255.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_output_stays_in_unit_range() {
        let out = convert_grayscale(&ramp(Dimensions::new(37, 41)));
        assert!(out.values().iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(out.values()[0], 0.0);
        assert_eq!(out.values()[255], 1.0);
    }

    #[test]
    fn test_shape_and_row_major_layout_preserved() {
        let image = ramp(Dimensions::new(13, 7));
        let out = convert_grayscale(&image);
        assert_eq!(out.dimensions(), image.dimensions());
        assert_eq!(out.values().len(), 13 * 7);
        for r in 0..13 {
            for c in 0..7 {
                assert_eq!(out.get(r, c), f64::from(image.get(r, c)) / 255.0);
            }
        }
    }

    #[test]
    fn test_lane_kernel_matches_scalar_bitwise() {
        // Sizes around the lane width exercise the scalar tail
        for len in [1usize, 7, 8, 9, 15, 16, 17, 1000] {
            let image = ramp(Dimensions::new(1, len));
            let lanes = convert_grayscale(&image);
            let scalar = convert_grayscale_scalar(&image);
            let lanes_bits: Vec<u64> = lanes.values().iter().map(|v| v.to_bits()).collect();
            let scalar_bits: Vec<u64> = scalar.values().iter().map(|v| v.to_bits()).collect();
            assert_eq!(lanes_bits, scalar_bits, "len {len}");
        }
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let image = ramp(Dimensions::new(50, 50));
        let first = convert_grayscale(&image);
        let second = convert_grayscale(&image);
        assert!(
            first
                .values()
                .iter()
                .zip(second.values())
                .all(|(a, b)| a.to_bits() == b.to_bits())
        );
    }

    #[test]
    fn test_normalize_ignores_trailing_samples() {
        let out = normalize(1, 2, &[255, 0, 17]);
        assert_eq!(out, vec![1.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn test_normalize_panics_on_short_buffer() {
        let _ = normalize(2, 2, &[1, 2, 3]);
    }
}
