// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for valbench.
//!
//! All errors are explicit enums. No `Box<dyn Error>` and no `anyhow::Result`
//! in library code.

use std::path::PathBuf;

use thiserror::Error;

use crate::constraint::{ConstraintKind, PropertyKind};

/// Top-level error type for the validation engine and its configuration.
#[derive(Debug, Error)]
pub enum ValbenchError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Engine Errors - Descriptor Compilation and Lookup
    // =========================================================================
    #[error("Constraint error: {0}")]
    Constraint(#[from] ConstraintError),

    #[error("Cached descriptor does not match type {type_name}")]
    DescriptorTypeMismatch { type_name: &'static str },

    // =========================================================================
    // Fixture Errors
    // =========================================================================
    #[error("Fixture not found: {name}")]
    FixtureNotFound { name: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Hard validation errors reject a configuration before any benchmark runs.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Missing required field: {field} in {context}")]
    MissingRequiredField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Duplicate profile name: {name}")]
    DuplicateProfileName { name: String },

    #[error("Schema validation failed: {message}")]
    SchemaValidation { message: String },
}

/// Errors raised while compiling a type's constraint declarations.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Constraint {constraint} cannot be applied to {kind} property '{property}' of {type_name}")]
    NotApplicable {
        type_name: &'static str,
        property: &'static str,
        constraint: ConstraintKind,
        kind: PropertyKind,
    },

    #[error("Invalid pattern '{pattern}' on property '{property}': {reason}")]
    InvalidPattern {
        property: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("Invalid bounds on property '{property}': min {min} > max {max}")]
    InvalidBounds {
        property: &'static str,
        min: i64,
        max: i64,
    },

    #[error("Property '{property}' declared twice on {type_name}")]
    DuplicateProperty {
        type_name: &'static str,
        property: &'static str,
    },
}

/// Result type alias using ValbenchError.
pub type ValbenchResult<T> = Result<T, ValbenchError>;
