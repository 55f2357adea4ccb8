// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The nine measured operations, one per (shape, fill) pair.

use std::fmt;

use serde::Serialize;
use valbench_core::{ValbenchResult, Validator, ViolationSet};

use crate::context::BenchContext;
use crate::fixtures::{FillState, Fixture, Shape};
use crate::registry::FixtureKey;

/// A single `validate` call against one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Scenario {
    pub key: FixtureKey,
}

impl Scenario {
    pub const ALL: [Scenario; 9] = [
        Self::new(Shape::NoConstraints, FillState::Empty),
        Self::new(Shape::NoConstraints, FillState::MandatoryOnly),
        Self::new(Shape::NoConstraints, FillState::Full),
        Self::new(Shape::FewConstraints, FillState::Empty),
        Self::new(Shape::FewConstraints, FillState::MandatoryOnly),
        Self::new(Shape::FewConstraints, FillState::Full),
        Self::new(Shape::LotsOfConstraints, FillState::Empty),
        Self::new(Shape::LotsOfConstraints, FillState::MandatoryOnly),
        Self::new(Shape::LotsOfConstraints, FillState::Full),
    ];

    pub const fn new(shape: Shape, fill: FillState) -> Self {
        Self {
            key: FixtureKey::new(shape, fill),
        }
    }

    pub fn shape(&self) -> Shape {
        self.key.shape
    }

    pub fn fill(&self) -> FillState {
        self.key.fill
    }

    /// Stable benchmark name, e.g. `validator_with_few_constraints_on_empty_record`.
    pub fn name(&self) -> String {
        format!(
            "validator_with_{}_on_{}_record",
            self.key.shape.name(),
            self.key.fill.name()
        )
    }

    /// Find a scenario by its benchmark name.
    pub fn find(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Validate the scenario's fixture once.
    pub fn run(&self, ctx: &BenchContext) -> ValbenchResult<ViolationSet> {
        ctx.validate(&self.key)
    }

    /// Resolve the fixture up front so the measured call is only `validate`.
    pub fn prepare<'a>(&self, ctx: &'a BenchContext) -> ValbenchResult<PreparedScenario<'a>> {
        Ok(PreparedScenario {
            validator: ctx.validator(),
            fixture: ctx.fixture(&self.key)?,
        })
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Scenario bound to a context; holds no lookups on the hot path.
#[derive(Debug, Clone, Copy)]
pub struct PreparedScenario<'a> {
    validator: &'a Validator,
    fixture: &'a Fixture,
}

impl PreparedScenario<'_> {
    #[inline]
    pub fn run(&self) -> ValbenchResult<ViolationSet> {
        self.fixture.validate(self.validator)
    }
}
