// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Declarative constraints and their compiled form.
//!
//! A [`Constraint`] is the declaration attached to a property. Compiling it
//! against the property's kind checks applicability and bounds and builds any
//! regex up front, so evaluation at validate time is a plain match.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::error::ConstraintError;

/// Lenient RFC 5322 local part, dot-separated host labels. No TLD required.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$";

/// Kind of value a property exposes to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Text,
    Integer,
    Flag,
    Nested,
}

impl PropertyKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Flag => "flag",
            Self::Nested => "nested",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Constraint identifier carried by reported violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstraintKind {
    NotNull,
    NotBlank,
    Valid,
    Email,
    Pattern,
    Min,
    Max,
    Range,
    Size,
    AssertTrue,
    AssertFalse,
}

impl ConstraintKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotNull => "NotNull",
            Self::NotBlank => "NotBlank",
            Self::Valid => "Valid",
            Self::Email => "Email",
            Self::Pattern => "Pattern",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Range => "Range",
            Self::Size => "Size",
            Self::AssertTrue => "AssertTrue",
            Self::AssertFalse => "AssertFalse",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A constraint declaration on a single property.
///
/// Every constraint except [`Constraint::NotNull`] accepts an absent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be present.
    NotNull,
    /// Text must contain at least one non-whitespace character.
    NotBlank,
    /// Cascade validation into the nested record.
    Valid,
    /// Text must be a well-formed email address. Empty text passes.
    Email,
    /// Text must match the regex (unanchored search).
    Pattern(&'static str),
    /// Integer must be `>=` the bound.
    Min(i64),
    /// Integer must be `<=` the bound.
    Max(i64),
    /// Integer must lie in `min..=max`.
    Range { min: i64, max: i64 },
    /// Text length in characters must lie in `min..=max`.
    Size { min: usize, max: usize },
    AssertTrue,
    AssertFalse,
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::NotNull => ConstraintKind::NotNull,
            Self::NotBlank => ConstraintKind::NotBlank,
            Self::Valid => ConstraintKind::Valid,
            Self::Email => ConstraintKind::Email,
            Self::Pattern(_) => ConstraintKind::Pattern,
            Self::Min(_) => ConstraintKind::Min,
            Self::Max(_) => ConstraintKind::Max,
            Self::Range { .. } => ConstraintKind::Range,
            Self::Size { .. } => ConstraintKind::Size,
            Self::AssertTrue => ConstraintKind::AssertTrue,
            Self::AssertFalse => ConstraintKind::AssertFalse,
        }
    }

    /// Check whether this constraint can be evaluated on a property kind.
    pub fn applies_to(&self, kind: PropertyKind) -> bool {
        match self {
            Self::NotNull => true,
            Self::NotBlank | Self::Email | Self::Pattern(_) | Self::Size { .. } => {
                kind == PropertyKind::Text
            }
            Self::Min(_) | Self::Max(_) | Self::Range { .. } => kind == PropertyKind::Integer,
            Self::AssertTrue | Self::AssertFalse => kind == PropertyKind::Flag,
            Self::Valid => kind == PropertyKind::Nested,
        }
    }

    /// Compile the declaration for a property of the given kind.
    pub(crate) fn compile(
        &self,
        type_name: &'static str,
        property: &'static str,
        kind: PropertyKind,
    ) -> Result<CompiledConstraint, ConstraintError> {
        if !self.applies_to(kind) {
            return Err(ConstraintError::NotApplicable {
                type_name,
                property,
                constraint: self.kind(),
                kind,
            });
        }

        let check = match self {
            Self::NotNull => Check::NotNull,
            Self::NotBlank => Check::NotBlank,
            Self::Valid => Check::Cascade,
            Self::Email => Check::Matches {
                regex: compile_regex(property, EMAIL_PATTERN)?,
                message: "must be a well-formed email address".to_string(),
                allow_empty: true,
            },
            Self::Pattern(pattern) => Check::Matches {
                regex: compile_regex(property, pattern)?,
                message: format!("must match \"{}\"", pattern),
                allow_empty: false,
            },
            Self::Min(min) => Check::Min(*min),
            Self::Max(max) => Check::Max(*max),
            Self::Range { min, max } => {
                if min > max {
                    return Err(ConstraintError::InvalidBounds {
                        property,
                        min: *min,
                        max: *max,
                    });
                }
                Check::Range(*min, *max)
            }
            Self::Size { min, max } => {
                if min > max {
                    return Err(ConstraintError::InvalidBounds {
                        property,
                        min: *min as i64,
                        max: *max as i64,
                    });
                }
                Check::Size(*min, *max)
            }
            Self::AssertTrue => Check::Is(true),
            Self::AssertFalse => Check::Is(false),
        };

        Ok(CompiledConstraint {
            kind: self.kind(),
            check,
        })
    }
}

fn compile_regex(property: &'static str, pattern: &str) -> Result<Regex, ConstraintError> {
    Regex::new(pattern).map_err(|e| ConstraintError::InvalidPattern {
        property,
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Value read from a property at validate time.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldValue<'a> {
    Text(Option<&'a str>),
    Integer(Option<i64>),
    Flag(Option<bool>),
    Nested { present: bool },
}

impl FieldValue<'_> {
    pub(crate) fn is_present(&self) -> bool {
        match self {
            Self::Text(v) => v.is_some(),
            Self::Integer(v) => v.is_some(),
            Self::Flag(v) => v.is_some(),
            Self::Nested { present } => *present,
        }
    }

    /// Render the value for violation reports.
    pub(crate) fn render(&self) -> Option<String> {
        match self {
            Self::Text(v) => v.map(|s| s.to_string()),
            Self::Integer(v) => v.map(|n| n.to_string()),
            Self::Flag(v) => v.map(|b| b.to_string()),
            Self::Nested { .. } => None,
        }
    }
}

#[derive(Debug)]
enum Check {
    NotNull,
    NotBlank,
    Cascade,
    Matches {
        regex: Regex,
        message: String,
        allow_empty: bool,
    },
    Min(i64),
    Max(i64),
    Range(i64, i64),
    Size(usize, usize),
    Is(bool),
}

/// A constraint ready for evaluation.
#[derive(Debug)]
pub(crate) struct CompiledConstraint {
    kind: ConstraintKind,
    check: Check,
}

impl CompiledConstraint {
    pub(crate) fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub(crate) fn is_cascade(&self) -> bool {
        matches!(self.check, Check::Cascade)
    }

    /// Evaluate against a value. Returns the violation message on failure.
    pub(crate) fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        if let Check::NotNull = self.check {
            return (!value.is_present()).then(|| "must not be null".to_string());
        }

        match (&self.check, value) {
            (Check::NotBlank, FieldValue::Text(Some(s))) => s
                .trim()
                .is_empty()
                .then(|| "must not be blank".to_string()),
            (
                Check::Matches {
                    regex,
                    message,
                    allow_empty,
                },
                FieldValue::Text(Some(s)),
            ) => {
                if *allow_empty && s.is_empty() {
                    return None;
                }
                (!regex.is_match(s)).then(|| message.clone())
            }
            (Check::Size(min, max), FieldValue::Text(Some(s))) => {
                let len = s.chars().count();
                (len < *min || len > *max)
                    .then(|| format!("size must be between {} and {}", min, max))
            }
            (Check::Min(min), FieldValue::Integer(Some(n))) => (n < min)
                .then(|| format!("must be greater than or equal to {}", min)),
            (Check::Max(max), FieldValue::Integer(Some(n))) => {
                (n > max).then(|| format!("must be less than or equal to {}", max))
            }
            (Check::Range(min, max), FieldValue::Integer(Some(n))) => (n < min || n > max)
                .then(|| format!("must be between {} and {}", min, max)),
            (Check::Is(expected), FieldValue::Flag(Some(b))) => {
                (b != expected).then(|| format!("must be {}", expected))
            }
            // Absent values pass; cascades are walked by the validator.
            _ => None,
        }
    }
}
