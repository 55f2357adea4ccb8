// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Constraint violations reported by the validator.

use std::fmt;

use serde::Serialize;

use crate::constraint::ConstraintKind;

/// One property failing one constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Type passed to `validate`, not the nested type.
    pub root_type: &'static str,
    /// Dotted path from the root, e.g. `f0.label`.
    pub property_path: String,
    pub constraint: ConstraintKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_value: Option<String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: {} ({})",
            self.root_type, self.property_path, self.message, self.constraint
        )
    }
}

/// Violations from one `validate` call, in property declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationSet {
    violations: Vec<Violation>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Check whether any violation targets the given property path.
    pub fn contains_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.property_path == path)
    }

    /// All violations on the given property path.
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.property_path == path)
    }

    /// Distinct property paths, in report order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for violation in &self.violations {
            if !paths.contains(&violation.property_path.as_str()) {
                paths.push(&violation.property_path);
            }
        }
        paths
    }
}

impl<'a> IntoIterator for &'a ViolationSet {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(path: &str, constraint: ConstraintKind) -> Violation {
        Violation {
            root_type: "Order",
            property_path: path.to_string(),
            constraint,
            message: "must not be null".to_string(),
            invalid_value: None,
        }
    }

    #[test]
    fn test_path_queries() {
        let mut set = ViolationSet::new();
        assert!(set.is_empty());

        set.push(violation("quantity", ConstraintKind::NotNull));
        set.push(violation("tag.label", ConstraintKind::NotNull));
        set.push(violation("quantity", ConstraintKind::Min));

        assert_eq!(set.len(), 3);
        assert!(set.contains_path("tag.label"));
        assert!(!set.contains_path("tag"));
        assert_eq!(set.for_path("quantity").count(), 2);
        assert_eq!(set.paths(), vec!["quantity", "tag.label"]);
    }

    #[test]
    fn test_display() {
        let v = violation("tag.label", ConstraintKind::NotNull);
        assert_eq!(
            v.to_string(),
            "Order.tag.label: must not be null (NotNull)"
        );
    }

    #[test]
    fn test_serializes_as_list() {
        let mut set = ViolationSet::new();
        set.push(violation("quantity", ConstraintKind::NotNull));
        let yaml = serde_yaml::to_string(&set).unwrap();
        assert!(yaml.starts_with("- root_type: Order"));
        assert!(!yaml.contains("invalid_value"));
    }
}
