// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Named fixture registry.
//!
//! Maps the nine documented fixture names to their instances. Built once per
//! benchmark context and read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use valbench_core::ValbenchError;

use crate::fixtures::{FillState, Fixture, Shape};

/// Identifies one fixture by shape and fill state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FixtureKey {
    pub shape: Shape,
    pub fill: FillState,
}

impl FixtureKey {
    /// Every key in registry order.
    pub const ALL: [FixtureKey; 9] = [
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
        Self { shape, fill }
    }

    /// Registry name. The mandatory-only group carries no suffix.
    pub const fn name(&self) -> &'static str {
        match (self.shape, self.fill) {
            (Shape::NoConstraints, FillState::MandatoryOnly) => "noConstraintPOJO",
            (Shape::FewConstraints, FillState::MandatoryOnly) => "fewConstraintsPOJO",
            (Shape::LotsOfConstraints, FillState::MandatoryOnly) => "lotsOfConstraintsPOJO",
            (Shape::NoConstraints, FillState::Empty) => "noConstraintEmptyPOJO",
            (Shape::FewConstraints, FillState::Empty) => "fewConstraintsEmptyPOJO",
            (Shape::LotsOfConstraints, FillState::Empty) => "lotsOfConstraintsEmptyPOJO",
            (Shape::NoConstraints, FillState::Full) => "noConstraintFullPOJO",
            (Shape::FewConstraints, FillState::Full) => "fewConstraintsFullPOJO",
            (Shape::LotsOfConstraints, FillState::Full) => "lotsOfConstraintsFullPOJO",
        }
    }
}

impl fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FixtureKey {
    type Err = ValbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| ValbenchError::FixtureNotFound {
                name: s.to_string(),
            })
    }
}

/// Read-only mapping from fixture key to instance.
#[derive(Debug, Clone)]
pub struct FixtureRegistry {
    fixtures: BTreeMap<FixtureKey, Fixture>,
}

impl FixtureRegistry {
    /// Build every fixture and the name map in one step.
    pub fn build() -> Self {
        let fixtures = FixtureKey::ALL
            .into_iter()
            .map(|key| (key, Fixture::build(key.shape, key.fill)))
            .collect();
        Self { fixtures }
    }

    pub fn get(&self, key: &FixtureKey) -> Option<&Fixture> {
        self.fixtures.get(key)
    }

    /// Look up a fixture by its registry name.
    pub fn get_by_name(&self, name: &str) -> Result<&Fixture, ValbenchError> {
        let key: FixtureKey = name.parse()?;
        self.fixtures
            .get(&key)
            .ok_or_else(|| ValbenchError::FixtureNotFound {
                name: name.to_string(),
            })
    }

    /// Entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&FixtureKey, &Fixture)> {
        self.fixtures.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &FixtureKey> {
        self.fixtures.keys()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
