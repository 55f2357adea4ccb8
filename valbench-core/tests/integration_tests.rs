// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end integration tests for valbench-core.
//!
//! These tests cover loading configuration from disk and validating records
//! through the public API only.

use std::time::Duration;

use tempfile::TempDir;
use valbench_core::{
    cascade, describe, BenchmarkMode, ConfigLoader, Constrained, Constraint, ConstraintError,
    ConstraintKind, DescriptorBuilder, PrewarmPolicy, TypeDescriptor, ValbenchError,
    ValidatorFactory,
};

#[derive(Debug, Clone, PartialEq)]
struct Sku {
    code: Option<String>,
}

impl Constrained for Sku {
    fn describe(builder: DescriptorBuilder<Self>) -> Result<TypeDescriptor<Self>, ConstraintError> {
        builder
            .text(
                "code",
                |s| s.code.as_deref(),
                [Constraint::NotNull, Constraint::Pattern(r"^[A-Z]{3}-\d{4}$")],
            )
            .build()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LineItem {
    sku: Option<Sku>,
    quantity: Option<i64>,
    contact: Option<String>,
    gift_wrapped: Option<bool>,
}

impl Constrained for LineItem {
    fn describe(builder: DescriptorBuilder<Self>) -> Result<TypeDescriptor<Self>, ConstraintError> {
        builder
            .named("LineItem")
            .nested(
                "sku",
                |l| cascade(l.sku.as_ref()),
                [Constraint::NotNull, Constraint::Valid],
            )
            .integer(
                "quantity",
                |l| l.quantity,
                [Constraint::Min(1), Constraint::Max(500)],
            )
            .text(
                "contact",
                |l| l.contact.as_deref(),
                [Constraint::Email, Constraint::Size { min: 3, max: 32 }],
            )
            .flag("gift_wrapped", |l| l.gift_wrapped, [Constraint::AssertFalse])
            .build()
    }
}

/// Test configuration loading and validation from a file
#[test]
fn test_config_loading_and_validation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("valbench.yaml");

    std::fs::write(
        &config_path,
        r#"
validator:
  strict: true
sampling:
  iteration_time_ms: 20
profiles:
  - name: cold
    modes: [single_shot]
    warmup_iterations: 0
    measurement_iterations: 5
  - name: warm
    modes: [single_shot, sample_time]
    warmup_iterations: 3
    measurement_iterations: 5
    prewarm: single
"#,
    )
    .expect("Failed to write config");

    let config = ConfigLoader::load_file(&config_path).expect("Failed to load config");
    assert_eq!(config.profiles.len(), 2);
    assert_eq!(config.sampling.iteration_time, Duration::from_millis(20));

    let warm = config.profile("warm").unwrap();
    assert_eq!(warm.prewarm, PrewarmPolicy::Single);
    assert!(warm.modes.contains(&BenchmarkMode::SampleTime));

    let validator = ValidatorFactory::from_config(&config.validator);
    assert!(validator.is_strict());
}

/// Test that a missing file is reported distinctly from a bad one
#[test]
fn test_config_not_found() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = ConfigLoader::load_file(temp_dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(ValbenchError::ConfigNotFound { .. })));

    let bad_path = temp_dir.path().join("bad.yaml");
    std::fs::write(&bad_path, "profiles: [").unwrap();
    let result = ConfigLoader::load_file(&bad_path);
    assert!(matches!(result, Err(ValbenchError::ConfigParse { .. })));
}

/// Test a full validation pass with a cascade and every property kind
#[test]
fn test_validate_line_item() {
    let validator = ValidatorFactory::validator(true);

    let item = LineItem {
        sku: Some(Sku {
            code: Some("abc-12".to_string()),
        }),
        quantity: Some(0),
        contact: Some("x@y".to_string()),
        gift_wrapped: Some(true),
    };

    let violations = validator.validate(&item).expect("validate failed");
    assert_eq!(
        violations.paths(),
        vec!["sku.code", "quantity", "gift_wrapped"]
    );
    assert!(violations.iter().all(|v| v.root_type == "LineItem"));

    let code = violations.for_path("sku.code").next().unwrap();
    assert_eq!(code.constraint, ConstraintKind::Pattern);

    let fixed = LineItem {
        sku: Some(Sku {
            code: Some("ABC-1234".to_string()),
        }),
        quantity: Some(12),
        contact: None,
        gift_wrapped: Some(false),
    };
    assert!(validator.validate(&fixed).unwrap().is_empty());
}

/// Test that the cache turns the second call into a pure hit
#[test]
fn test_second_call_hits_cache() {
    let validator = ValidatorFactory::validator(true);
    let item = LineItem {
        sku: None,
        quantity: None,
        contact: None,
        gift_wrapped: None,
    };

    let first = validator.validate(&item).unwrap();
    let after_first = validator.cache_stats();
    assert_eq!(after_first.misses, 1);
    assert_eq!(after_first.cached_types, 1);

    let second = validator.validate(&item).unwrap();
    let after_second = validator.cache_stats();
    assert_eq!(after_second.misses, 1);
    assert_eq!(after_second.hits, 1);
    assert_eq!(first, second);
    assert_eq!(first.paths(), vec!["sku"]);
}

/// Test that descriptors can be inspected without a validator
#[test]
fn test_describe_without_cache() {
    let descriptor = describe::<LineItem>().expect("describe failed");
    assert_eq!(descriptor.type_name(), "LineItem");
    assert_eq!(descriptor.property_count(), 4);
    assert_eq!(descriptor.constraint_count(), 7);
}
