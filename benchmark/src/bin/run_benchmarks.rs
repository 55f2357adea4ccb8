// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to run the validation profiles and generate reports.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use valbench_benchmark::{
    quick_config, run_profile, BenchmarkReport, JsonReporter, LatencyMetrics,
};
use valbench_core::{Config, ConfigLoader, ProfileConfig};

#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Run validation benchmarks and generate JSON reports")]
struct Args {
    /// Profile configuration file (built-in profiles if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for benchmark data
    #[arg(short, long, default_value = "data")]
    output: PathBuf,

    /// Profiles to run (all if not specified)
    #[arg(short, long)]
    profile: Vec<String>,

    /// Write one report file per profile
    #[arg(long)]
    per_profile: bool,

    /// Run in quick mode (fewer iterations)
    #[arg(long)]
    quick: bool,

    /// List available profiles and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigLoader::builtin()?,
    };
    let config = if args.quick {
        quick_config(&config)
    } else {
        config
    };

    if args.list {
        print_profiles(&config);
        return Ok(());
    }

    let selected = select_profiles(&config, &args.profile)?;

    println!("Valbench Benchmark Suite");
    println!("========================");
    println!("Output directory: {:?}", args.output);
    println!("Strict validation: {}", config.validator.strict);
    println!();

    let reporter = JsonReporter::new(&args.output)?;
    let mut report = BenchmarkReport::new();

    for profile in selected {
        println!("Running profile {}...", profile.name);
        let results = run_profile(profile, &config)
            .with_context(|| format!("profile {} failed", profile.name))?;
        for result in &results {
            println!("  ✓ {} [{}]", result.name, result.mode);
        }
        report.extend(results);
    }

    let paths = if args.per_profile {
        reporter.save_by_profile(&report)?
    } else {
        vec![reporter.save(&report)?]
    };
    println!();
    for path in &paths {
        println!("Benchmark report saved to: {:?}", path);
    }
    println!();

    print_summary(&report);

    Ok(())
}

fn select_profiles<'a>(
    config: &'a Config,
    names: &[String],
) -> anyhow::Result<Vec<&'a ProfileConfig>> {
    if names.is_empty() {
        return Ok(config.profiles.iter().collect());
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match config.profile(name) {
            Some(profile) => selected.push(profile),
            None => bail!(
                "unknown profile '{}' (available: {})",
                name,
                config
                    .profiles
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
    Ok(selected)
}

fn print_profiles(config: &Config) {
    for profile in &config.profiles {
        let modes: Vec<&str> = profile.modes.iter().map(|m| m.name()).collect();
        println!(
            "{}: modes={} warmup={} iterations={} prewarm={}",
            profile.name,
            modes.join(","),
            profile.warmup_iterations,
            profile.measurement_iterations,
            profile.prewarm
        );
    }
}

fn print_summary(report: &BenchmarkReport) {
    println!("Summary");
    println!("-------");
    println!();

    for result in &report.results {
        let latency = &result.latency;
        println!(
            "{} {} [{}]: median={}, p99={}, first={}",
            result.profile,
            result.name,
            result.mode,
            LatencyMetrics::format_latency(latency.median_ns),
            LatencyMetrics::format_latency(latency.p99_ns),
            LatencyMetrics::format_latency(latency.first_ns)
        );
    }
}
