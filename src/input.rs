//! Text input for the demo image
//!
//! Accepts the interactive format of the reference program: `"<height>, <width>"`
//! followed by `height * width` samples, all separated by commas and/or whitespace,
//! e.g. `"2, 2\n0, 255, 128, 1"`. Everything the core needs to trust (dimension
//! bounds, sample range) is validated here.

use thiserror::Error;

use crate::types::{Dimensions, GrayImage, MAX_DIMENSION};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("error reading {0}")]
    MalformedDimension(&'static str),

    #[error("invalid dimensions {height}x{width} (expected 1..=10000 per side)")]
    InvalidDimensions { height: i64, width: i64 },

    #[error("error reading pixel value at index {index}")]
    MalformedPixel { index: usize },

    #[error("pixel value {value} at index {index} must be between 0 and 255")]
    PixelOutOfRange { index: usize, value: i64 },

    #[error("expected {expected} pixel values, found {found}")]
    MissingPixels { expected: usize, found: usize },

    #[error("unexpected `{0}` after image dimensions")]
    UnexpectedToken(String),

    #[error("empty input")]
    Empty,
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

/// Parse `"<height>, <width>"` (comma and/or whitespace separated)
///
/// # Errors
///
/// Returns [`InputError::MalformedDimension`] for missing or non-numeric values,
/// [`InputError::InvalidDimensions`] if either side is outside `1..=10000`, and
/// [`InputError::UnexpectedToken`] if anything follows the width.
pub fn parse_dimensions(text: &str) -> Result<Dimensions, InputError> {
    let mut it = tokens(text);
    let dims = read_dimensions(&mut it)?;
    match it.next() {
        Some(extra) => Err(InputError::UnexpectedToken(extra.to_string())),
        None => Ok(dims),
    }
}

fn read_dimensions<'a>(it: &mut impl Iterator<Item = &'a str>) -> Result<Dimensions, InputError> {
    let height = parse_int(it.next(), "height")?;
    let width = parse_int(it.next(), "width")?;

    let in_range = |v: i64| (1..=MAX_DIMENSION as i64).contains(&v);
    if !in_range(height) || !in_range(width) {
        return Err(InputError::InvalidDimensions { height, width });
    }

    // Both sides were range checked above
    Ok(Dimensions::new(height as usize, width as usize))
}

fn parse_int(token: Option<&str>, what: &'static str) -> Result<i64, InputError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or(InputError::MalformedDimension(what))
}

/// Parse exactly `dims.pixel_count()` samples; trailing values are ignored
///
/// # Errors
///
/// Returns an error for a non-numeric token, a value outside `0..=255`, or too few
/// values.
pub fn parse_pixels(text: &str, dims: Dimensions) -> Result<GrayImage, InputError> {
    read_pixels(tokens(text), dims)
}

fn read_pixels<'a>(
    tokens: impl Iterator<Item = &'a str>,
    dims: Dimensions,
) -> Result<GrayImage, InputError> {
    let expected = dims.pixel_count();
    let mut samples = Vec::with_capacity(expected);

    for (index, token) in tokens.take(expected).enumerate() {
        let value: i64 = token
            .parse()
            .map_err(|_| InputError::MalformedPixel { index })?;
        let sample =
            u8::try_from(value).map_err(|_| InputError::PixelOutOfRange { index, value })?;
        samples.push(sample);
    }

    if samples.len() < expected {
        return Err(InputError::MissingPixels {
            expected,
            found: samples.len(),
        });
    }

    Ok(GrayImage::from_parts(dims, samples))
}

/// Parse a whole image: height, width, then the samples, as one token stream
///
/// Line breaks carry no meaning, so `"2, 2 0 255 128 1"` and `"2, 2\n0, 255\n128, 1"`
/// read the same image.
///
/// # Errors
///
/// See [`parse_dimensions`] and [`parse_pixels`].
pub fn parse_image(text: &str) -> Result<GrayImage, InputError> {
    let mut it = tokens(text).peekable();
    if it.peek().is_none() {
        return Err(InputError::Empty);
    }
    let dims = read_dimensions(&mut it)?;
    tracing::debug!(%dims, "parsed image dimensions");
    read_pixels(it, dims)
}
