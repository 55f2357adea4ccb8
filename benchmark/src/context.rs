// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark context: validator plus fixtures, built once per run.

use valbench_core::{
    PrewarmPolicy, ValbenchError, ValbenchResult, Validator, ValidatorConfig, ValidatorFactory,
    ViolationSet,
};

use crate::fixtures::Fixture;
use crate::prewarm::prewarm;
use crate::registry::{FixtureKey, FixtureRegistry};

/// Everything a scenario needs, passed by reference.
#[derive(Debug)]
pub struct BenchContext {
    validator: Validator,
    registry: FixtureRegistry,
    prewarm: PrewarmPolicy,
}

impl BenchContext {
    /// Build the validator and every fixture, then apply the pre-warm policy.
    pub fn setup(config: &ValidatorConfig, policy: PrewarmPolicy) -> ValbenchResult<Self> {
        let validator = ValidatorFactory::from_config(config);
        let registry = FixtureRegistry::build();
        prewarm(policy, &validator, &registry)?;

        Ok(Self {
            validator,
            registry,
            prewarm: policy,
        })
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn registry(&self) -> &FixtureRegistry {
        &self.registry
    }

    pub fn prewarm_policy(&self) -> PrewarmPolicy {
        self.prewarm
    }

    pub fn fixture(&self, key: &FixtureKey) -> ValbenchResult<&Fixture> {
        self.registry
            .get(key)
            .ok_or_else(|| ValbenchError::FixtureNotFound {
                name: key.name().to_string(),
            })
    }

    /// Validate one registry entry.
    pub fn validate(&self, key: &FixtureKey) -> ValbenchResult<ViolationSet> {
        self.fixture(key)?.validate(&self.validator)
    }
}
