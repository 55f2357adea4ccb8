// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Standalone diagnostic: first vs second call timings plus a smoke check.
//!
//! Prints one `<fixture>: <ms>` line per validation to the given writer.
//! The smoke check fails when the empty few-constraints record yields no
//! violations, which would mean the engine is not enforcing anything.

use std::io::{self, Write};
use std::time::Duration;

use thiserror::Error;
use valbench_core::ValbenchError;

use crate::context::BenchContext;
use crate::fixtures::{FillState, Shape};
use crate::harness::measure;
use crate::registry::FixtureKey;

/// Fixture that must produce violations.
pub const SMOKE_FIXTURE: FixtureKey = FixtureKey::new(Shape::FewConstraints, FillState::Empty);

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("Smoke check failed: '{fixture}' produced no violations")]
    NoViolations { fixture: &'static str },

    #[error(transparent)]
    Validation(#[from] ValbenchError),

    #[error("Failed to write diagnostic output: {0}")]
    Output(#[from] io::Error),
}

/// One timed `validate` call.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticTiming {
    pub fixture: FixtureKey,
    pub elapsed: Duration,
    pub violations: usize,
}

#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    pub first: Vec<DiagnosticTiming>,
    pub second: Vec<DiagnosticTiming>,
    pub smoke_violations: usize,
}

/// Validate every fixture twice, printing timings, then run the smoke check.
pub fn run_diagnostic<W: Write>(
    ctx: &BenchContext,
    out: &mut W,
) -> Result<DiagnosticReport, DiagnosticError> {
    writeln!(out, "validate() first occurrence:")?;
    let first = timed_pass(ctx, out)?;
    writeln!(out)?;
    writeln!(out, "validate() second occurrence:")?;
    let second = timed_pass(ctx, out)?;

    let smoke_violations = smoke_check(ctx, SMOKE_FIXTURE)?;
    writeln!(out)?;
    writeln!(out, "{}: {} violation(s)", SMOKE_FIXTURE, smoke_violations)?;

    Ok(DiagnosticReport {
        first,
        second,
        smoke_violations,
    })
}

fn timed_pass<W: Write>(
    ctx: &BenchContext,
    out: &mut W,
) -> Result<Vec<DiagnosticTiming>, DiagnosticError> {
    let mut timings = Vec::with_capacity(ctx.registry().len());
    for (key, fixture) in ctx.registry().iter() {
        let (violations, elapsed) = measure(|| fixture.validate(ctx.validator()));
        let violations = violations?;
        writeln!(out, "{}: {:.3}ms", key, elapsed.as_secs_f64() * 1_000.0)?;
        timings.push(DiagnosticTiming {
            fixture: *key,
            elapsed,
            violations: violations.len(),
        });
    }
    Ok(timings)
}

/// Validate `key` and require at least one violation.
pub fn smoke_check(ctx: &BenchContext, key: FixtureKey) -> Result<usize, DiagnosticError> {
    let violations = ctx.validate(&key)?;
    if violations.is_empty() {
        tracing::error!(fixture = key.name(), "Smoke check found no violations");
        return Err(DiagnosticError::NoViolations {
            fixture: key.name(),
        });
    }
    for violation in &violations {
        tracing::debug!(%violation, "Smoke check violation");
    }
    Ok(violations.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use valbench_core::{PrewarmPolicy, ValidatorConfig};

    fn context() -> BenchContext {
        BenchContext::setup(&ValidatorConfig::default(), PrewarmPolicy::None).unwrap()
    }

    #[test]
    fn test_diagnostic_output() {
        let ctx = context();
        let mut out = Vec::new();

        let report = run_diagnostic(&ctx, &mut out).unwrap();
        assert_eq!(report.first.len(), 9);
        assert_eq!(report.second.len(), 9);
        assert_eq!(report.smoke_violations, 2);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("validate() first occurrence:\n"));
        assert!(text.contains("validate() second occurrence:\n"));
        assert_eq!(text.matches("fewConstraintsEmptyPOJO: ").count(), 3);
        assert!(text
            .lines()
            .filter(|line| line.ends_with("ms"))
            .all(|line| line.contains(": ")));
    }

    #[test]
    fn test_both_passes_see_same_violations() {
        let ctx = context();
        let report = run_diagnostic(&ctx, &mut io::sink()).unwrap();
        for (a, b) in report.first.iter().zip(&report.second) {
            assert_eq!(a.fixture, b.fixture);
            assert_eq!(a.violations, b.violations);
        }
    }

    #[test]
    fn test_smoke_check_fails_without_violations() {
        let ctx = context();
        let key = FixtureKey::new(Shape::FewConstraints, FillState::Full);

        let err = smoke_check(&ctx, key).unwrap_err();
        assert!(matches!(
            err,
            DiagnosticError::NoViolations {
                fixture: "fewConstraintsFullPOJO"
            }
        ));
    }
}
