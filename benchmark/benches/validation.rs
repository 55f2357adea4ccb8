// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Steady-state validation benchmarks.
//!
//! One shared context per run; criterion's own warmup populates the
//! descriptor cache, so these numbers exclude descriptor construction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use valbench_benchmark::{
    run_profile, BenchContext, BenchmarkReport, FillState, JsonReporter, Scenario,
};
use valbench_core::{ConfigLoader, PrewarmPolicy, ValidatorConfig};

fn bench_scenarios(c: &mut Criterion) {
    let ctx = BenchContext::setup(&ValidatorConfig::default(), PrewarmPolicy::None)
        .expect("Failed to set up benchmark context");

    let mut group = c.benchmark_group("validation");
    group.measurement_time(Duration::from_secs(5));

    for scenario in Scenario::ALL {
        let prepared = scenario.prepare(&ctx).expect("Missing fixture");
        group.bench_function(scenario.name(), |b| {
            b.iter(|| black_box(prepared.run().expect("validate failed")));
        });
    }

    group.finish();

    generate_json_report();
}

/// Run the built-in `validation` profile and save its JSON report.
fn generate_json_report() {
    let config = ConfigLoader::builtin().expect("Built-in config is valid");
    let profile = config
        .profile("validation")
        .expect("Built-in validation profile");

    let mut report = BenchmarkReport::new();
    report.extend(run_profile(profile, &config).expect("validation profile failed"));

    if let Ok(reporter) = JsonReporter::default_location() {
        if let Ok(path) = reporter.save(&report) {
            println!(
                "Saved validation benchmark report to: {:?} (in {:?})",
                path,
                reporter.output_dir()
            );
        }
    }
}

/// Non-strict mode stops at the first violation; only empty records differ.
fn bench_fail_fast(c: &mut Criterion) {
    let ctx = BenchContext::setup(&ValidatorConfig { strict: false }, PrewarmPolicy::Single)
        .expect("Failed to set up benchmark context");

    let mut group = c.benchmark_group("validation_fail_fast");
    for scenario in Scenario::ALL.into_iter().filter(|s| s.fill() == FillState::Empty) {
        let prepared = scenario.prepare(&ctx).expect("Missing fixture");
        group.bench_function(scenario.name(), |b| {
            b.iter(|| black_box(prepared.run().expect("validate failed")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scenarios, bench_fail_fast);
criterion_main!(benches);
