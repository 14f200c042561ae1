use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use grayconv::cli::Args;
use grayconv::config::BenchmarkConfig;
use grayconv::display;
use grayconv::input;
use grayconv::{BenchmarkHarness, verify};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        println!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.benchmark_config();
    config.validate().context("Invalid benchmark configuration")?;

    display::print_banner();

    if !args.skip_demo {
        run_demo(args.input.as_deref())?;
    }

    run_performance(&config)
}

/// Stage 1: convert and check a user-supplied image
fn run_demo(path: Option<&Path>) -> Result<()> {
    println!("=== Program Proper ===");
    println!();

    let text = read_input(path)?;
    let image = input::parse_image(&text).context("Failed to parse input image")?;
    let output = image.normalize();
    display::print_conversion(&image, &output);

    let report = verify::check(image.samples(), output.values(), image.samples().len());
    display::print_correctness(&report);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read image from stdin")?;
            Ok(text)
        }
    }
}

/// Stage 2: time the kernel over generated inputs
fn run_performance(config: &BenchmarkConfig) -> Result<()> {
    println!("=== Performance Testing ===");

    let seed = config.resolve_seed();
    tracing::info!(seed, "seeded input generator");

    let mut harness = BenchmarkHarness::new(seed);
    let results = harness.run_config(config, display::print_benchmark_result)?;

    let failed = results.iter().filter(|r| !r.correctness_passed).count();
    if failed > 0 {
        tracing::warn!(failed, total = results.len(), "some test cases failed correctness");
    }
    Ok(())
}
