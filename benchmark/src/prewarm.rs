// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Pre-warm variants.
//!
//! `PrewarmPolicy::Single` validates every registry entry once, in registry
//! order, before measurement. Results are discarded; the point is to leave
//! the validator's descriptor cache populated for every shape.

use std::time::Instant;

use valbench_core::{PrewarmPolicy, ValbenchResult, Validator};

use crate::registry::FixtureRegistry;

/// Apply a pre-warm policy. Returns the number of `validate` calls made.
pub fn prewarm(
    policy: PrewarmPolicy,
    validator: &Validator,
    registry: &FixtureRegistry,
) -> ValbenchResult<usize> {
    match policy {
        PrewarmPolicy::None => Ok(0),
        PrewarmPolicy::Single => {
            let started = Instant::now();
            let mut calls = 0;

            for (key, fixture) in registry.iter() {
                let violations = fixture.validate(validator)?;
                tracing::debug!(
                    fixture = key.name(),
                    violations = violations.len(),
                    "Pre-warm validate"
                );
                calls += 1;
            }

            tracing::debug!(
                calls,
                cached_types = validator.cache_stats().cached_types,
                elapsed_us = started.elapsed().as_micros() as u64,
                "Pre-warm complete"
            );
            Ok(calls)
        }
    }
}
