pub mod benchmark;
pub mod cli;
pub mod config;
pub mod display;
pub mod image;
pub mod input;
pub mod types;
pub mod verify;

// Re-export commonly used items
pub use benchmark::{BenchmarkHarness, BenchmarkResult};
pub use image::normalize;
pub use types::{Dimensions, GrayImage, NormalizedImage, TOLERANCE};
pub use verify::{CorrectnessReport, check};
