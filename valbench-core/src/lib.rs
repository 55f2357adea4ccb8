// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Valbench Core Library
//!
//! Constraint-validation engine measured by the valbench benchmarks.
//! Record types declare per-property constraints through [`Constrained`];
//! the [`Validator`] compiles those declarations once per type, caches the
//! result, and evaluates it on every `validate` call.

pub mod config;
pub mod constraint;
pub mod descriptor;
pub mod error;
pub mod types;
pub mod validator;
pub mod violation;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, ProfileConfig, SamplingConfig, ValidatorConfig};
pub use constraint::{Constraint, ConstraintKind, PropertyKind};
pub use descriptor::{cascade, describe, Constrained, DescriptorBuilder, TypeDescriptor};
pub use error::{ConstraintError, HardValidationError, ValbenchError, ValbenchResult};
pub use types::{BenchmarkMode, PrewarmPolicy, ProfileName};
pub use validator::{CacheStats, Cascade, Validator, ValidatorFactory};
pub use violation::{Violation, ViolationSet};
