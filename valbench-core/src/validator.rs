// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Constraint validator with a per-type descriptor cache.
//!
//! The first `validate` call on a type describes and compiles its constraints
//! (regexes included) and stores the descriptor in a DashMap keyed by
//! `TypeId`. Later calls on the same type skip straight to evaluation.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use serde::Serialize;

use crate::config::ValidatorConfig;
use crate::descriptor::{describe, Constrained, TypeDescriptor};
use crate::error::{ValbenchError, ValbenchResult};
use crate::violation::{Violation, ViolationSet};

/// Type-erased entry point for cascading into a nested record.
///
/// Implemented for every [`Constrained`] type.
pub trait Cascade {
    fn cascade_into(
        &self,
        validator: &Validator,
        root_type: &'static str,
        path: &str,
        violations: &mut ViolationSet,
    ) -> ValbenchResult<()>;
}

impl<T: Constrained> Cascade for T {
    fn cascade_into(
        &self,
        validator: &Validator,
        root_type: &'static str,
        path: &str,
        violations: &mut ViolationSet,
    ) -> ValbenchResult<()> {
        validator.walk(self, Some(root_type), Some(path), violations)
    }
}

/// Descriptor cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub cached_types: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Validates [`Constrained`] records.
///
/// Strict mode evaluates every constraint and reports every violation.
/// Non-strict mode returns as soon as one violation is found.
pub struct Validator {
    strict: bool,
    descriptors: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Validator {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            descriptors: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Validate a record and return every violation found.
    pub fn validate<T: Constrained>(&self, value: &T) -> ValbenchResult<ViolationSet> {
        let mut violations = ViolationSet::new();
        self.walk(value, None, None, &mut violations)?;
        Ok(violations)
    }

    fn walk<T: Constrained>(
        &self,
        value: &T,
        root_type: Option<&'static str>,
        prefix: Option<&str>,
        violations: &mut ViolationSet,
    ) -> ValbenchResult<()> {
        let descriptor = self.descriptor::<T>()?;
        let root_type = root_type.unwrap_or(descriptor.type_name());

        for property in &descriptor.properties {
            let (field, nested) = property.read(value);
            let path = || match prefix {
                Some(prefix) => format!("{}.{}", prefix, property.name),
                None => property.name.to_string(),
            };

            for constraint in &property.constraints {
                if constraint.is_cascade() {
                    if let Some(nested) = nested {
                        nested.cascade_into(self, root_type, &path(), violations)?;
                    }
                } else if let Some(message) = constraint.check(&field) {
                    violations.push(Violation {
                        root_type,
                        property_path: path(),
                        constraint: constraint.kind(),
                        message,
                        invalid_value: field.render(),
                    });
                }

                if !self.strict && !violations.is_empty() {
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    /// Fetch the cached descriptor for `T`, building it on first use.
    pub fn descriptor<T: Constrained>(&self) -> ValbenchResult<Arc<TypeDescriptor<T>>> {
        let type_id = TypeId::of::<T>();
        let cached = self
            .descriptors
            .get(&type_id)
            .map(|entry| Arc::clone(entry.value()));

        let erased = match cached {
            Some(erased) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                erased
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                let started = Instant::now();
                let descriptor = describe::<T>()?;

                tracing::debug!(
                    type_name = descriptor.type_name(),
                    properties = descriptor.property_count(),
                    constraints = descriptor.constraint_count(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "Built constraint descriptor"
                );

                let erased: Arc<dyn Any + Send + Sync> = Arc::new(descriptor);
                // A racing builder may have won; keep whichever landed first.
                let entry = self.descriptors.entry(type_id).or_insert(erased);
                Arc::clone(entry.value())
            }
        };

        erased
            .downcast::<TypeDescriptor<T>>()
            .map_err(|_| ValbenchError::DescriptorTypeMismatch {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Check whether `T` already has a cached descriptor.
    pub fn is_cached<T: Constrained>(&self) -> bool {
        self.descriptors.contains_key(&TypeId::of::<T>())
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            cached_types: self.descriptors.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop every cached descriptor. Counters are kept.
    pub fn clear_cache(&self) {
        self.descriptors.clear();
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("strict", &self.strict)
            .field("cache", &self.cache_stats())
            .finish()
    }
}

/// Builds validators.
pub struct ValidatorFactory;

impl ValidatorFactory {
    /// Create a validator. `strict` reports every violation instead of the first.
    pub fn validator(strict: bool) -> Validator {
        Validator::new(strict)
    }

    pub fn from_config(config: &ValidatorConfig) -> Validator {
        Validator::new(config.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraint, ConstraintKind};
    use crate::descriptor::{cascade, DescriptorBuilder};
    use crate::error::ConstraintError;

    #[derive(Debug, Clone, PartialEq)]
    struct Address {
        city: Option<String>,
    }

    impl Constrained for Address {
        fn describe(
            builder: DescriptorBuilder<Self>,
        ) -> Result<TypeDescriptor<Self>, ConstraintError> {
            builder
                .text(
                    "city",
                    |a| a.city.as_deref(),
                    [Constraint::NotNull, Constraint::NotBlank],
                )
                .build()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        email: Option<String>,
        age: Option<i64>,
        active: Option<bool>,
        address: Option<Address>,
    }

    impl Constrained for Account {
        fn describe(
            builder: DescriptorBuilder<Self>,
        ) -> Result<TypeDescriptor<Self>, ConstraintError> {
            builder
                .text(
                    "email",
                    |a| a.email.as_deref(),
                    [Constraint::NotNull, Constraint::Email],
                )
                .integer("age", |a| a.age, [Constraint::Range { min: 18, max: 130 }])
                .flag("active", |a| a.active, [Constraint::AssertTrue])
                .nested(
                    "address",
                    |a| cascade(a.address.as_ref()),
                    [Constraint::NotNull, Constraint::Valid],
                )
                .build()
        }
    }

    struct Broken {
        code: Option<String>,
    }

    impl Constrained for Broken {
        fn describe(
            builder: DescriptorBuilder<Self>,
        ) -> Result<TypeDescriptor<Self>, ConstraintError> {
            builder
                .text("code", |b| b.code.as_deref(), [Constraint::Pattern("[a-")])
                .build()
        }
    }

    fn valid_account() -> Account {
        Account {
            email: Some("someone@example.org".to_string()),
            age: Some(42),
            active: Some(true),
            address: Some(Address {
                city: Some("Lyon".to_string()),
            }),
        }
    }

    #[test]
    fn test_valid_record_has_no_violations() {
        let validator = Validator::new(true);
        let violations = validator.validate(&valid_account()).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_strict_reports_everything() {
        let validator = ValidatorFactory::validator(true);
        let account = Account {
            email: Some("nope".to_string()),
            age: Some(7),
            active: Some(false),
            address: None,
        };

        let violations = validator.validate(&account).unwrap();
        assert_eq!(violations.paths(), vec!["email", "age", "active", "address"]);

        let email = violations.for_path("email").next().unwrap();
        assert_eq!(email.constraint, ConstraintKind::Email);
        assert_eq!(email.invalid_value.as_deref(), Some("nope"));
        assert_eq!(email.root_type, "Account");
    }

    #[test]
    fn test_non_strict_stops_at_first_violation() {
        let validator = ValidatorFactory::validator(false);
        assert!(!validator.is_strict());

        let account = Account {
            email: None,
            age: Some(7),
            active: None,
            address: None,
        };
        let violations = validator.validate(&account).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations.contains_path("email"));
    }

    #[test]
    fn test_cascade_uses_dotted_path_and_root_type() {
        let validator = Validator::new(true);
        let mut account = valid_account();
        account.address = Some(Address {
            city: Some("   ".to_string()),
        });

        let violations = validator.validate(&account).unwrap();
        assert_eq!(violations.len(), 1);
        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.property_path, "address.city");
        assert_eq!(violation.root_type, "Account");
        assert_eq!(violation.constraint, ConstraintKind::NotBlank);
    }

    #[test]
    fn test_descriptor_cache() {
        let validator = Validator::new(true);
        assert!(!validator.is_cached::<Account>());

        validator.validate(&valid_account()).unwrap();
        let stats = validator.cache_stats();
        assert_eq!(stats.cached_types, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 0);
        assert!(validator.is_cached::<Account>());
        assert!(validator.is_cached::<Address>());

        validator.validate(&valid_account()).unwrap();
        let stats = validator.cache_stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 2);

        validator.clear_cache();
        assert_eq!(validator.cache_stats().cached_types, 0);
        assert!(!validator.is_cached::<Account>());
    }

    #[test]
    fn test_nested_not_described_when_absent() {
        let validator = Validator::new(true);
        let mut account = valid_account();
        account.address = None;

        validator.validate(&account).unwrap();
        assert!(!validator.is_cached::<Address>());
    }

    #[test]
    fn test_validation_leaves_record_untouched() {
        let validator = Validator::new(true);
        let account = valid_account();
        let before = account.clone();
        validator.validate(&account).unwrap();
        assert_eq!(account, before);
    }

    #[test]
    fn test_broken_descriptor_propagates() {
        let validator = Validator::new(true);
        let err = validator
            .validate(&Broken {
                code: Some("x".to_string()),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ValbenchError::Constraint(ConstraintError::InvalidPattern { .. })
        ));
        assert!(!validator.is_cached::<Broken>());
    }

    #[test]
    fn test_concurrent_validation() {
        use std::thread;

        let validator = Arc::new(Validator::new(true));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let validator = Arc::clone(&validator);
                thread::spawn(move || {
                    let violations = validator.validate(&valid_account()).unwrap();
                    assert!(violations.is_empty());
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(validator.cache_stats().cached_types, 2);
    }
}
