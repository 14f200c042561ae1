use std::fmt::Write as _;

use crate::benchmark::BenchmarkResult;
use crate::types::{GrayImage, NormalizedImage};
use crate::verify::CorrectnessReport;

#[must_use]
pub fn format_gray_image(image: &GrayImage) -> String {
    let mut out = String::with_capacity(image.samples().len() * 4 + image.height());
    for row in image.rows() {
        for sample in row {
            let _ = write!(out, "{sample:3} ");
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn format_normalized_image(image: &NormalizedImage) -> String {
    let mut out = String::with_capacity(image.values().len() * 5);
    for row in image.rows() {
        for value in row {
            let _ = write!(out, "{value:.2} ");
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn verdict(passed: bool) -> &'static str {
    if passed { "PASSED!" } else { "FAILED..." }
}

#[must_use]
pub fn format_mismatches(report: &CorrectnessReport) -> String {
    let mut out = String::new();
    for m in &report.mismatches {
        let _ = writeln!(
            out,
            "Error at index {}: expected {:.4}, got {:.4}",
            m.index, m.expected, m.actual
        );
    }
    out
}

#[must_use]
pub fn format_benchmark_result(result: &BenchmarkResult) -> String {
    format!(
        "Test Case: {dims} ({size} pixels)\n\
         Correctness check: {verdict}\n\
         Average execution time ({runs} runs): {avg:.6}s\n\
         Time/pixel: {per:.9}s\n",
        dims = result.dimensions(),
        size = result.size,
        verdict = verdict(result.correctness_passed),
        runs = result.num_runs,
        avg = result.average_latency_secs,
        per = result.per_element_latency_secs,
    )
}

pub fn print_banner() {
    println!("Grayscale Image Conversion (u8 -> f64)");
    println!();
}

pub fn print_conversion(input: &GrayImage, output: &NormalizedImage) {
    println!("Input:");
    print!("{}", format_gray_image(input));
    println!();
    println!("Output:");
    print!("{}", format_normalized_image(output));
    println!();
}

pub fn print_correctness(report: &CorrectnessReport) {
    println!("=== Correctness Checking ===");
    println!();
    print!("{}", format_mismatches(report));
    println!("{}", verdict(report.passed()));
    println!();
}

pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!();
    print!("{}", format_benchmark_result(result));
}
