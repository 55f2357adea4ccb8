// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Profile runner.
//!
//! Every (scenario, mode) pair gets its own [`BenchContext`], so the first
//! measured call of a profile without pre-warm always hits an empty
//! descriptor cache.

use std::time::Duration;

use valbench_core::{BenchmarkMode, Config, ProfileConfig, ValbenchResult};

use crate::context::BenchContext;
use crate::harness::BenchmarkHarness;
use crate::metrics::{BenchmarkResult, LatencyMetrics};
use crate::scenario::Scenario;

const QUICK_MEASUREMENT_ITERATIONS: u64 = 3;
const QUICK_WARMUP_ITERATIONS: u64 = 1;
const QUICK_ITERATION_TIME: Duration = Duration::from_millis(10);

/// Run every scenario of a profile in each of its modes.
pub fn run_profile(profile: &ProfileConfig, config: &Config) -> ValbenchResult<Vec<BenchmarkResult>> {
    run_scenarios(profile, config, &Scenario::ALL)
}

/// Run a subset of scenarios under a profile.
pub fn run_scenarios(
    profile: &ProfileConfig,
    config: &Config,
    scenarios: &[Scenario],
) -> ValbenchResult<Vec<BenchmarkResult>> {
    tracing::info!(
        profile = %profile.name,
        modes = ?profile.modes,
        prewarm = %profile.prewarm,
        scenarios = scenarios.len(),
        "Running profile"
    );

    let mut results = Vec::with_capacity(scenarios.len() * profile.modes.len());
    for &mode in &profile.modes {
        for scenario in scenarios {
            results.push(run_one(profile, config, *scenario, mode)?);
        }
    }

    tracing::info!(profile = %profile.name, results = results.len(), "Profile complete");
    Ok(results)
}

fn run_one(
    profile: &ProfileConfig,
    config: &Config,
    scenario: Scenario,
    mode: BenchmarkMode,
) -> ValbenchResult<BenchmarkResult> {
    let ctx = BenchContext::setup(&config.validator, profile.prewarm)?;
    let prepared = scenario.prepare(&ctx)?;
    let harness =
        BenchmarkHarness::from_profile(profile, &config.sampling, mode).keep_samples(false);

    let samples = harness.try_run(|| {
        let violations = prepared.run()?;
        std::hint::black_box(violations);
        Ok::<(), valbench_core::ValbenchError>(())
    })?;

    let result = BenchmarkResult::latency(
        scenario.name(),
        profile.name.as_str(),
        mode,
        samples,
        harness.should_keep_samples(),
    )
    .with_metadata("profile", profile.name.as_str())
    .with_metadata("shape", scenario.shape())
    .with_metadata("fill", scenario.fill())
    .with_metadata("prewarm", profile.prewarm)
    .with_metadata("strict", config.validator.strict);

    tracing::debug!(
        scenario = %scenario,
        mode = %mode,
        samples = result.iterations,
        median = %LatencyMetrics::format_latency(result.latency.median_ns),
        first = %LatencyMetrics::format_latency(result.latency.first_ns),
        "Scenario measured"
    );
    Ok(result)
}

/// Shrink every profile for a fast sanity run. Pre-warm and modes are kept.
pub fn quick_config(config: &Config) -> Config {
    let mut quick = config.clone();
    quick.sampling.iteration_time = quick.sampling.iteration_time.min(QUICK_ITERATION_TIME);
    for profile in &mut quick.profiles {
        profile.warmup_iterations = profile.warmup_iterations.min(QUICK_WARMUP_ITERATIONS);
        profile.measurement_iterations = profile
            .measurement_iterations
            .min(QUICK_MEASUREMENT_ITERATIONS);
    }
    quick
}
