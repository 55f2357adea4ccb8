// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers and enums for validated configuration inputs.
//!
//! Types validate their invariants at creation time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Validated benchmark profile name.
/// Must be non-empty, alphanumeric with hyphens/underscores, max 64 chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileName(String);

impl ProfileName {
    /// Create a new ProfileName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: "Profile name cannot be empty".to_string(),
            });
        }

        if name.len() > 64 {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name.clone(),
                reason: format!("Profile name too long: {} chars (max 64)", name.len()),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: "Profile name must contain only alphanumeric characters, hyphens, and underscores".to_string(),
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProfileName {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProfileName> for String {
    fn from(name: ProfileName) -> Self {
        name.0
    }
}

/// Timing mode of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkMode {
    /// One timed call per measurement iteration. Exposes cold-call cost.
    SingleShot,
    /// Many timed calls per iteration, each recorded as a sample.
    SampleTime,
}

impl BenchmarkMode {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SingleShot => "single_shot",
            Self::SampleTime => "sample_time",
        }
    }
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BenchmarkMode {
    type Err = HardValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_shot" => Ok(Self::SingleShot),
            "sample_time" => Ok(Self::SampleTime),
            _ => Err(HardValidationError::InvalidFieldValue {
                field: "modes",
                value: s.to_string(),
                reason: "Expected single_shot or sample_time".to_string(),
            }),
        }
    }
}

/// Whether the validator is exercised once per fixture before measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrewarmPolicy {
    /// Measurement starts with an untouched descriptor cache.
    #[default]
    None,
    /// One discarded `validate` call per fixture fills the cache first.
    Single,
}

impl PrewarmPolicy {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for PrewarmPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_name_valid() {
        assert!(ProfileName::new("validation").is_ok());
        assert!(ProfileName::new("single-shot_no-warmup").is_ok());
        assert!(ProfileName::new("Profile2").is_ok());
    }

    #[test]
    fn test_profile_name_invalid() {
        assert!(ProfileName::new("").is_err());
        assert!(ProfileName::new("a".repeat(65)).is_err());
        assert!(ProfileName::new("single shot").is_err());
        assert!(ProfileName::new("warm/up").is_err());
    }

    #[test]
    fn test_mode_round_trip_names() {
        for mode in [BenchmarkMode::SingleShot, BenchmarkMode::SampleTime] {
            assert_eq!(mode.name().parse::<BenchmarkMode>().unwrap(), mode);
        }
        assert!("throughput".parse::<BenchmarkMode>().is_err());
    }

    #[test]
    fn test_prewarm_default() {
        assert_eq!(PrewarmPolicy::default(), PrewarmPolicy::None);
        assert_eq!(PrewarmPolicy::Single.to_string(), "single");
    }
}
