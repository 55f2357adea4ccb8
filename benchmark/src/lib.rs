// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Valbench Benchmarking Framework
//!
//! Measures the cost of `validate` across three record shapes (no, few and
//! lots of constraints) in three fill states (empty, mandatory-only, full).
//!
//! # Profiles
//!
//! - **validation**: single-shot and sampled timings with untimed warmup
//! - **single-shot-no-warmup**: first calls on a fresh validator
//! - **single-shot-prewarmed**: first calls after one pass over every fixture
//!
//! # Data Output
//!
//! `run_benchmarks` writes JSON reports; `validation_smoke` prints first and
//! second call timings and checks that violations are reported at all.

pub mod context;
pub mod diagnostic;
pub mod fixtures;
pub mod harness;
pub mod metrics;
pub mod prewarm;
pub mod registry;
pub mod reporter;
pub mod runner;
pub mod scenario;

pub use context::BenchContext;
pub use diagnostic::{run_diagnostic, DiagnosticError, DiagnosticReport};
pub use fixtures::{FillState, Fixture, Shape};
pub use harness::BenchmarkHarness;
pub use metrics::{BenchmarkReport, BenchmarkResult, LatencyMetrics, SystemInfo};
pub use prewarm::prewarm;
pub use registry::{FixtureKey, FixtureRegistry};
pub use reporter::JsonReporter;
pub use runner::{quick_config, run_profile, run_scenarios};
pub use scenario::{PreparedScenario, Scenario};
