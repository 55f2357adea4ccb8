// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark fixtures: three record shapes in three fill states.
//!
//! All shapes share one ten-field layout ([`RecordFields`]) and differ only in
//! the constraints they declare on it. Construction is deterministic and uses
//! fixed literals, so two builds of the same (shape, fill) are equal.

use std::fmt;

use serde::Serialize;
use valbench_core::{
    cascade, Constrained, Constraint, ConstraintError, DescriptorBuilder, TypeDescriptor,
    ValbenchResult, Validator, ViolationSet,
};

/// Label written to `f0` by every non-empty fill.
pub const F0_LABEL: &str = "p1";
/// Email written to `f2` by every non-empty fill.
pub const F2_EMAIL: &str = "an_email2@acme.fr";
/// Label written to `f5` by every non-empty fill.
pub const F5_LABEL: &str = "p5";
/// Email written to `f7` by every non-empty fill.
pub const F7_EMAIL: &str = "an_email7@acme.fr";

/// Minimal nested record with one required label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub label: Option<String>,
}

impl Aggregate {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

impl Constrained for Aggregate {
    fn describe(builder: DescriptorBuilder<Self>) -> Result<TypeDescriptor<Self>, ConstraintError> {
        builder
            .text("label", |a| a.label.as_deref(), [Constraint::NotNull])
            .build()
    }
}

/// Which fields of a fixture are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillState {
    /// Every field unset.
    Empty,
    /// Only the fields whose constraints fail outright when unset.
    MandatoryOnly,
    /// Every field set to a valid value.
    Full,
}

impl FillState {
    pub const ALL: [FillState; 3] = [Self::Empty, Self::MandatoryOnly, Self::Full];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::MandatoryOnly => "mandatory_only",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for FillState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Constraint layout of a fixture type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    NoConstraints,
    FewConstraints,
    LotsOfConstraints,
}

impl Shape {
    pub const ALL: [Shape; 3] = [
        Self::NoConstraints,
        Self::FewConstraints,
        Self::LotsOfConstraints,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::NoConstraints => "no_constraints",
            Self::FewConstraints => "few_constraints",
            Self::LotsOfConstraints => "lots_of_constraints",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Field layout shared by every shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub f0: Option<Aggregate>,
    pub f1: Option<i32>,
    pub f2: Option<String>,
    pub f3: Option<i64>,
    pub f4: Option<bool>,
    pub f5: Option<Aggregate>,
    pub f6: Option<i32>,
    pub f7: Option<String>,
    pub f8: Option<i64>,
    pub f9: Option<bool>,
}

impl RecordFields {
    /// Build the field values for a fill state.
    pub fn filled(fill: FillState) -> Self {
        let mut fields = Self::default();
        match fill {
            FillState::Empty => {}
            FillState::MandatoryOnly => fields.set_mandatory(),
            FillState::Full => {
                fields.set_mandatory();
                fields.set_optional();
            }
        }
        fields
    }

    fn set_mandatory(&mut self) {
        self.f0 = Some(Aggregate::new(F0_LABEL));
        self.f2 = Some(F2_EMAIL.to_string());
        self.f5 = Some(Aggregate::new(F5_LABEL));
        self.f7 = Some(F7_EMAIL.to_string());
    }

    fn set_optional(&mut self) {
        self.f1 = Some(1);
        self.f3 = Some(3);
        self.f4 = Some(true);
        self.f6 = Some(6);
        self.f8 = Some(8);
        self.f9 = Some(false);
    }

    /// Names of the fields currently set, in declaration order.
    pub fn set_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("f0", self.f0.is_some()),
            ("f1", self.f1.is_some()),
            ("f2", self.f2.is_some()),
            ("f3", self.f3.is_some()),
            ("f4", self.f4.is_some()),
            ("f5", self.f5.is_some()),
            ("f6", self.f6.is_some()),
            ("f7", self.f7.is_some()),
            ("f8", self.f8.is_some()),
            ("f9", self.f9.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }
}

/// Access to the shared field layout.
pub trait RecordShape {
    fn fields(&self) -> &RecordFields;
}

/// Per-field constraint declarations for one shape.
#[derive(Debug, Default)]
struct FieldConstraints {
    f0: Vec<Constraint>,
    f1: Vec<Constraint>,
    f2: Vec<Constraint>,
    f3: Vec<Constraint>,
    f4: Vec<Constraint>,
    f5: Vec<Constraint>,
    f6: Vec<Constraint>,
    f7: Vec<Constraint>,
    f8: Vec<Constraint>,
    f9: Vec<Constraint>,
}

impl FieldConstraints {
    fn declare<T>(self, builder: DescriptorBuilder<T>) -> DescriptorBuilder<T>
    where
        T: Constrained + RecordShape,
    {
        builder
            .nested("f0", |r| cascade(r.fields().f0.as_ref()), self.f0)
            .integer("f1", |r| r.fields().f1.map(i64::from), self.f1)
            .text("f2", |r| r.fields().f2.as_deref(), self.f2)
            .integer("f3", |r| r.fields().f3, self.f3)
            .flag("f4", |r| r.fields().f4, self.f4)
            .nested("f5", |r| cascade(r.fields().f5.as_ref()), self.f5)
            .integer("f6", |r| r.fields().f6.map(i64::from), self.f6)
            .text("f7", |r| r.fields().f7.as_deref(), self.f7)
            .integer("f8", |r| r.fields().f8, self.f8)
            .flag("f9", |r| r.fields().f9, self.f9)
    }
}

/// Record declaring no constraints at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoConstraints(pub RecordFields);

/// Record with constraints on `f0`, `f1` and `f2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FewConstraints(pub RecordFields);

/// Record with constraints on every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotsOfConstraints(pub RecordFields);

impl RecordShape for NoConstraints {
    fn fields(&self) -> &RecordFields {
        &self.0
    }
}

impl RecordShape for FewConstraints {
    fn fields(&self) -> &RecordFields {
        &self.0
    }
}

impl RecordShape for LotsOfConstraints {
    fn fields(&self) -> &RecordFields {
        &self.0
    }
}

impl Constrained for NoConstraints {
    fn describe(builder: DescriptorBuilder<Self>) -> Result<TypeDescriptor<Self>, ConstraintError> {
        FieldConstraints::default().declare(builder).build()
    }
}

impl Constrained for FewConstraints {
    fn describe(builder: DescriptorBuilder<Self>) -> Result<TypeDescriptor<Self>, ConstraintError> {
        FieldConstraints {
            f0: vec![Constraint::NotNull, Constraint::Valid],
            f1: vec![Constraint::Min(0)],
            f2: vec![Constraint::NotNull, Constraint::Email],
            ..Default::default()
        }
        .declare(builder)
        .build()
    }
}

impl Constrained for LotsOfConstraints {
    fn describe(builder: DescriptorBuilder<Self>) -> Result<TypeDescriptor<Self>, ConstraintError> {
        FieldConstraints {
            f0: vec![Constraint::NotNull, Constraint::Valid],
            f1: vec![Constraint::Range { min: 0, max: 100 }],
            f2: vec![
                Constraint::NotNull,
                Constraint::NotBlank,
                Constraint::Email,
                Constraint::Size { min: 3, max: 64 },
            ],
            f3: vec![Constraint::Min(0), Constraint::Max(1000)],
            f4: vec![Constraint::AssertTrue],
            f5: vec![Constraint::NotNull, Constraint::Valid],
            f6: vec![Constraint::Range { min: 0, max: 10 }],
            f7: vec![
                Constraint::NotNull,
                Constraint::Email,
                Constraint::Pattern(r"@acme\.fr$"),
            ],
            f8: vec![Constraint::Max(100)],
            f9: vec![Constraint::AssertFalse],
        }
        .declare(builder)
        .build()
    }
}

/// One materialized (shape, fill) fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fixture {
    NoConstraints(NoConstraints),
    FewConstraints(FewConstraints),
    LotsOfConstraints(LotsOfConstraints),
}

impl Fixture {
    /// Build a fixture. Deterministic and infallible.
    pub fn build(shape: Shape, fill: FillState) -> Self {
        let fields = RecordFields::filled(fill);
        match shape {
            Shape::NoConstraints => Self::NoConstraints(NoConstraints(fields)),
            Shape::FewConstraints => Self::FewConstraints(FewConstraints(fields)),
            Shape::LotsOfConstraints => Self::LotsOfConstraints(LotsOfConstraints(fields)),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::NoConstraints(_) => Shape::NoConstraints,
            Self::FewConstraints(_) => Shape::FewConstraints,
            Self::LotsOfConstraints(_) => Shape::LotsOfConstraints,
        }
    }

    pub fn fields(&self) -> &RecordFields {
        match self {
            Self::NoConstraints(r) => r.fields(),
            Self::FewConstraints(r) => r.fields(),
            Self::LotsOfConstraints(r) => r.fields(),
        }
    }

    /// Validate the underlying record with its own type's descriptor.
    pub fn validate(&self, validator: &Validator) -> ValbenchResult<ViolationSet> {
        match self {
            Self::NoConstraints(r) => validator.validate(r),
            Self::FewConstraints(r) => validator.validate(r),
            Self::LotsOfConstraints(r) => validator.validate(r),
        }
    }
}
