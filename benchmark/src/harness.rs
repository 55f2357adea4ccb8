// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for running and timing operations.
//!
//! Two timing modes are supported. Single-shot makes exactly one timed call
//! per measurement iteration, so a fresh validator exposes its cold-call
//! cost. Sample-time keeps calling for a fixed iteration time and records
//! every call as a sample.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use valbench_core::{BenchmarkMode, ProfileConfig, SamplingConfig};

/// Initial sample buffer cap; longer sample-time runs grow the buffer.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

/// A benchmark harness for measuring operation latency.
#[derive(Debug, Clone)]
pub struct BenchmarkHarness {
    mode: BenchmarkMode,
    /// Untimed iterations before measurement
    warmup_iterations: u64,
    measurement_iterations: u64,
    /// Length of one sample-time iteration
    iteration_time: Duration,
    /// Sample-time cap per iteration
    max_samples: usize,
    keep_raw_samples: bool,
}

impl BenchmarkHarness {
    /// Create a new benchmark harness with default settings.
    pub fn new() -> Self {
        Self {
            mode: BenchmarkMode::SingleShot,
            warmup_iterations: 10,
            measurement_iterations: 100,
            iteration_time: Duration::from_millis(100),
            max_samples: 10_000,
            keep_raw_samples: true,
        }
    }

    /// Harness for one mode of a configured profile.
    pub fn from_profile(
        profile: &ProfileConfig,
        sampling: &SamplingConfig,
        mode: BenchmarkMode,
    ) -> Self {
        Self::new()
            .mode(mode)
            .warmup(profile.warmup_iterations)
            .iterations(profile.measurement_iterations)
            .iteration_time(sampling.iteration_time)
            .max_samples(sampling.max_samples_per_iteration)
    }

    pub fn mode(mut self, mode: BenchmarkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of warmup iterations.
    pub fn warmup(mut self, iterations: u64) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    /// Set the number of measurement iterations.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.measurement_iterations = iterations;
        self
    }

    pub fn iteration_time(mut self, time: Duration) -> Self {
        self.iteration_time = time;
        self
    }

    /// Cap on samples per sample-time iteration. Zero is treated as one.
    pub fn max_samples(mut self, max: usize) -> Self {
        self.max_samples = max.max(1);
        self
    }

    /// Set whether to keep raw sample data.
    pub fn keep_samples(mut self, keep: bool) -> Self {
        self.keep_raw_samples = keep;
        self
    }

    pub fn benchmark_mode(&self) -> BenchmarkMode {
        self.mode
    }

    /// Check if raw samples should be kept.
    pub fn should_keep_samples(&self) -> bool {
        self.keep_raw_samples
    }

    /// Run an infallible operation. Returns nanosecond samples in execution order.
    pub fn run<F>(&self, mut operation: F) -> Vec<u64>
    where
        F: FnMut(),
    {
        match self.try_run(|| {
            operation();
            Ok::<(), Infallible>(())
        }) {
            Ok(samples) => samples,
            Err(never) => match never {},
        }
    }

    /// Run a fallible operation. The first error aborts the run.
    pub fn try_run<F, E>(&self, mut operation: F) -> Result<Vec<u64>, E>
    where
        F: FnMut() -> Result<(), E>,
    {
        for _ in 0..self.warmup_iterations {
            self.iteration(&mut operation, None)?;
        }

        let mut samples = Vec::with_capacity(self.expected_samples());
        for _ in 0..self.measurement_iterations {
            self.iteration(&mut operation, Some(&mut samples))?;
        }

        Ok(samples)
    }

    fn iteration<F, E>(&self, operation: &mut F, mut samples: Option<&mut Vec<u64>>) -> Result<(), E>
    where
        F: FnMut() -> Result<(), E>,
    {
        match self.mode {
            BenchmarkMode::SingleShot => {
                let timer = Timer::start();
                operation()?;
                let elapsed = timer.stop();
                if let Some(samples) = samples {
                    samples.push(elapsed);
                }
            }
            BenchmarkMode::SampleTime => {
                let started = Instant::now();
                let mut calls = 0;
                loop {
                    let timer = Timer::start();
                    operation()?;
                    let elapsed = timer.stop();
                    if let Some(samples) = samples.as_deref_mut() {
                        samples.push(elapsed);
                    }
                    calls += 1;
                    if calls >= self.max_samples || started.elapsed() >= self.iteration_time {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn expected_samples(&self) -> usize {
        let iterations = usize::try_from(self.measurement_iterations).unwrap_or(usize::MAX);
        let expected = match self.mode {
            BenchmarkMode::SingleShot => iterations,
            BenchmarkMode::SampleTime => iterations.saturating_mul(self.max_samples),
        };
        expected.min(MAX_PREALLOCATED_SAMPLES)
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer for measuring individual operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed nanoseconds.
    pub fn stop(self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}

/// Measure the execution time of a closure.
pub fn measure<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use valbench_core::ConfigLoader;

    #[test]
    fn test_single_shot_one_sample_per_iteration() {
        let harness = BenchmarkHarness::new().warmup(3).iterations(5);
        let mut calls = 0;

        let samples = harness.run(|| calls += 1);

        assert_eq!(samples.len(), 5);
        assert_eq!(calls, 8);
    }

    #[test]
    fn test_single_shot_samples_cover_operation() {
        let harness = BenchmarkHarness::new().warmup(0).iterations(4);

        let samples = harness.run(|| {
            thread::sleep(Duration::from_micros(100));
        });

        assert_eq!(samples.len(), 4);
        for sample in &samples {
            assert!(*sample >= 100_000, "Sample {} < 100μs", sample);
        }
    }

    #[test]
    fn test_sample_time_respects_cap() {
        let harness = BenchmarkHarness::new()
            .mode(BenchmarkMode::SampleTime)
            .warmup(1)
            .iterations(3)
            .iteration_time(Duration::from_secs(10))
            .max_samples(25);

        let samples = harness.run(|| {});
        assert_eq!(samples.len(), 75);
    }

    #[test]
    fn test_sample_time_stops_on_iteration_time() {
        let harness = BenchmarkHarness::new()
            .mode(BenchmarkMode::SampleTime)
            .warmup(0)
            .iterations(2)
            .iteration_time(Duration::from_millis(5))
            .max_samples(1_000_000);

        let samples = harness.run(|| thread::sleep(Duration::from_millis(1)));
        assert!(samples.len() >= 2);
        assert!(samples.len() <= 20, "{} samples", samples.len());
    }

    #[test]
    fn test_try_run_propagates_first_error() {
        let harness = BenchmarkHarness::new().warmup(0).iterations(10);
        let mut calls = 0;

        let result = harness.try_run(|| {
            calls += 1;
            if calls == 3 {
                Err("boom")
            } else {
                Ok(())
            }
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_preallocation_is_capped() {
        let single = BenchmarkHarness::new().iterations(10);
        assert_eq!(single.expected_samples(), 10);

        let sampled = BenchmarkHarness::new()
            .mode(BenchmarkMode::SampleTime)
            .iterations(10_000)
            .max_samples(100_000);
        assert_eq!(sampled.expected_samples(), MAX_PREALLOCATED_SAMPLES);

        let short = BenchmarkHarness::new()
            .mode(BenchmarkMode::SampleTime)
            .iterations(2)
            .max_samples(25);
        assert_eq!(short.expected_samples(), 50);
    }

    #[test]
    fn test_from_profile() {
        let config = ConfigLoader::builtin().unwrap();
        let profile = config.profile("single-shot-prewarmed").unwrap();

        let harness =
            BenchmarkHarness::from_profile(profile, &config.sampling, BenchmarkMode::SingleShot);
        assert_eq!(harness.benchmark_mode(), BenchmarkMode::SingleShot);

        let mut calls = 0;
        let samples = harness.run(|| calls += 1);
        assert_eq!(samples.len(), 10);
        assert_eq!(calls, 10);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        assert!(elapsed >= 10_000_000, "Elapsed {} < 10ms", elapsed);
    }

    #[test]
    fn test_measure() {
        let (result, duration) = measure(|| {
            thread::sleep(Duration::from_millis(5));
            42
        });

        assert_eq!(result, 42);
        assert!(duration >= Duration::from_millis(5));
    }
}
