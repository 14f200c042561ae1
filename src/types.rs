//! Domain-specific types for grayscale pixel grids

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Largest accepted height or width
pub const MAX_DIMENSION: usize = 10_000;

/// Maximum absolute deviation accepted between an observed and expected normalized value
pub const TOLERANCE: f64 = 0.001;

/// Divisor mapping an 8-bit sample onto `[0.0, 1.0]`
pub const SAMPLE_MAX: f64 = 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    #[inline]
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    #[inline]
    #[must_use]
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=MAX_DIMENSION).contains(&self.height) && (1..=MAX_DIMENSION).contains(&self.width)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{height}x{width}", height = self.height, width = self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDimensionsError {
    #[error("expected HEIGHTxWIDTH, got `{0}`")]
    Format(String),

    #[error("dimensions {0} out of range (1..=10000 per side)")]
    OutOfRange(Dimensions),
}

/// Parses `HxW` (e.g. `100x100`), as used by the `--size` flag
impl FromStr for Dimensions {
    type Err = ParseDimensionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, w) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ParseDimensionsError::Format(s.to_string()))?;

        let height = h
            .trim()
            .parse()
            .map_err(|_| ParseDimensionsError::Format(s.to_string()))?;
        let width = w
            .trim()
            .parse()
            .map_err(|_| ParseDimensionsError::Format(s.to_string()))?;

        let dims = Self::new(height, width);
        if !dims.is_valid() {
            return Err(ParseDimensionsError::OutOfRange(dims));
        }
        Ok(dims)
    }
}

/// Dense row-major grid of 8-bit grayscale samples
///
/// The core never mutates a `GrayImage`; it only borrows the samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    dimensions: Dimensions,
    samples: Box<[u8]>,
}

impl GrayImage {
    /// Wrap `samples` as a grid of the given dimensions.
    ///
    /// Returns `None` if the sample count does not match `dimensions.pixel_count()`.
    #[must_use]
    pub fn from_raw(dimensions: Dimensions, samples: Vec<u8>) -> Option<Self> {
        (samples.len() == dimensions.pixel_count()).then(|| Self {
            dimensions,
            samples: samples.into_boxed_slice(),
        })
    }

    /// Caller guarantees `samples.len() == dimensions.pixel_count()`
    pub(crate) fn from_parts(dimensions: Dimensions, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), dimensions.pixel_count());
        Self {
            dimensions,
            samples: samples.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn zeros(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            samples: vec![0u8; dimensions.pixel_count()].into_boxed_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.samples[self.dimensions.index(row, col)]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(self.dimensions.width.max(1))
    }
}

/// Dense row-major grid of normalized samples in `[0.0, 1.0]`
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    dimensions: Dimensions,
    values: Box<[f64]>,
}

impl NormalizedImage {
    /// Returns `None` if the value count does not match `dimensions.pixel_count()`.
    #[must_use]
    pub fn from_raw(dimensions: Dimensions, values: Vec<f64>) -> Option<Self> {
        (values.len() == dimensions.pixel_count()).then(|| Self {
            dimensions,
            values: values.into_boxed_slice(),
        })
    }

    /// Caller guarantees `values.len() == dimensions.pixel_count()`
    pub(crate) fn from_parts(dimensions: Dimensions, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), dimensions.pixel_count());
        Self {
            dimensions,
            values: values.into_boxed_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[self.dimensions.index(row, col)]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.dimensions.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_dimensions_index_is_row_major() {
        let dims = Dimensions::new(3, 4);
        assert_eq!(dims.pixel_count(), 12);
        assert_eq!(dims.index(0, 0), 0);
        assert_eq!(dims.index(1, 0), 4);
        assert_eq!(dims.index(2, 3), 11);
    }

    #[test]
    fn test_dimensions_validity_bounds() {
        assert!(Dimensions::new(1, 1).is_valid());
        assert!(Dimensions::new(MAX_DIMENSION, MAX_DIMENSION).is_valid());
        assert!(!Dimensions::new(0, 10).is_valid());
        assert!(!Dimensions::new(10, MAX_DIMENSION + 1).is_valid());
    }

    #[test]
    fn test_dimensions_from_str() {
        assert_eq!("100x200".parse::<Dimensions>(), Ok(Dimensions::new(100, 200)));
        assert_eq!(" 3 X 4 ".parse::<Dimensions>(), Ok(Dimensions::new(3, 4)));
        assert_matches!("100".parse::<Dimensions>(), Err(ParseDimensionsError::Format(_)));
        assert_matches!("ax3".parse::<Dimensions>(), Err(ParseDimensionsError::Format(_)));
        assert_matches!(
            "0x3".parse::<Dimensions>(),
            Err(ParseDimensionsError::OutOfRange(_))
        );
    }

    #[test]
    fn test_dimensions_display_round_trips() {
        let dims = Dimensions::new(10, 20);
        assert_eq!(dims.to_string(), "10x20");
        assert_eq!(dims.to_string().parse::<Dimensions>(), Ok(dims));
    }

    #[test]
    fn test_gray_image_from_raw_rejects_wrong_length() {
        assert!(GrayImage::from_raw(Dimensions::new(2, 2), vec![0; 3]).is_none());
        let image = GrayImage::from_raw(Dimensions::new(2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(image.get(1, 0), 4);
        assert_eq!(image.rows().count(), 2);
    }
}
