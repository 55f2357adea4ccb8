// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Describes the validator settings and the benchmark profiles to run.
//! Any invalid field results in a HardValidationError before measurement.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{HardValidationError, ValbenchError, ValbenchResult};
use crate::types::{BenchmarkMode, PrewarmPolicy, ProfileName};

const MAX_MEASUREMENT_ITERATIONS: u64 = 10_000;
const MAX_WARMUP_ITERATIONS: u64 = 10_000;
const MAX_ITERATION_TIME_MS: u64 = 60_000;
const MAX_SAMPLES_PER_ITERATION: usize = 100_000;
/// Upper bound on samples one sample-time run may record.
const MAX_SAMPLES_PER_RUN: u64 = 10_000_000;

/// Built-in profiles: the plain benchmark and its two single-shot variants.
pub const BUILTIN_CONFIG: &str = r#"
validator:
  strict: true
profiles:
  - name: validation
    modes: [single_shot, sample_time]
    warmup_iterations: 10
    measurement_iterations: 10
    prewarm: none
  - name: single-shot-no-warmup
    modes: [single_shot]
    warmup_iterations: 0
    measurement_iterations: 10
    prewarm: none
  - name: single-shot-prewarmed
    modes: [single_shot]
    warmup_iterations: 0
    measurement_iterations: 10
    prewarm: single
"#;

/// Raw validator section.
#[derive(Debug, Deserialize)]
struct RawValidatorConfig {
    #[serde(default = "default_strict")]
    strict: bool,
}

fn default_strict() -> bool {
    true
}

impl Default for RawValidatorConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
        }
    }
}

/// Raw sampling section (sample-time mode only).
#[derive(Debug, Deserialize)]
struct RawSamplingConfig {
    #[serde(default = "default_iteration_time_ms")]
    iteration_time_ms: u64,
    #[serde(default = "default_max_samples")]
    max_samples_per_iteration: usize,
}

fn default_iteration_time_ms() -> u64 {
    100
}

fn default_max_samples() -> usize {
    10_000
}

impl Default for RawSamplingConfig {
    fn default() -> Self {
        Self {
            iteration_time_ms: default_iteration_time_ms(),
            max_samples_per_iteration: default_max_samples(),
        }
    }
}

/// Raw profile entry.
#[derive(Debug, Deserialize)]
struct RawProfileConfig {
    name: Option<String>,
    #[serde(default = "default_modes")]
    modes: Vec<BenchmarkMode>,
    #[serde(default = "default_iterations")]
    warmup_iterations: u64,
    #[serde(default = "default_iterations")]
    measurement_iterations: u64,
    #[serde(default)]
    prewarm: PrewarmPolicy,
}

fn default_modes() -> Vec<BenchmarkMode> {
    vec![BenchmarkMode::SingleShot, BenchmarkMode::SampleTime]
}

fn default_iterations() -> u64 {
    10
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    validator: RawValidatorConfig,
    #[serde(default)]
    sampling: RawSamplingConfig,
    profiles: Vec<RawProfileConfig>,
}

/// Validated validator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub strict: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Validated sampling settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    pub iteration_time: Duration,
    pub max_samples_per_iteration: usize,
}

/// Validated benchmark profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub name: ProfileName,
    pub modes: Vec<BenchmarkMode>,
    pub warmup_iterations: u64,
    pub measurement_iterations: u64,
    pub prewarm: PrewarmPolicy,
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub validator: ValidatorConfig,
    pub sampling: SamplingConfig,
    pub profiles: Vec<ProfileConfig>,
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.iter().find(|p| p.name.as_str() == name)
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> ValbenchResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ValbenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ValbenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> ValbenchResult<Config> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ValbenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// The built-in profiles.
    pub fn builtin() -> ValbenchResult<Config> {
        Self::load_string(BUILTIN_CONFIG)
    }

    fn validate(raw: RawConfig) -> ValbenchResult<Config> {
        let sampling = Self::validate_sampling(raw.sampling)?;

        let mut profiles = Vec::with_capacity(raw.profiles.len());
        let mut seen_names = HashSet::new();

        for (index, raw_profile) in raw.profiles.into_iter().enumerate() {
            let profile = Self::validate_profile(raw_profile, index)?;
            Self::validate_sample_budget(&profile, &sampling)?;

            if !seen_names.insert(profile.name.clone()) {
                return Err(HardValidationError::DuplicateProfileName {
                    name: profile.name.to_string(),
                }
                .into());
            }

            profiles.push(profile);
        }

        if profiles.is_empty() {
            return Err(HardValidationError::SchemaValidation {
                message: "At least one profile must be defined".to_string(),
            }
            .into());
        }

        Ok(Config {
            validator: ValidatorConfig {
                strict: raw.validator.strict,
            },
            sampling,
            profiles,
        })
    }

    fn validate_sampling(raw: RawSamplingConfig) -> ValbenchResult<SamplingConfig> {
        if raw.iteration_time_ms == 0 || raw.iteration_time_ms > MAX_ITERATION_TIME_MS {
            return Err(HardValidationError::InvalidFieldValue {
                field: "iteration_time_ms",
                value: raw.iteration_time_ms.to_string(),
                reason: format!("Must be between 1 and {}", MAX_ITERATION_TIME_MS),
            }
            .into());
        }

        if raw.max_samples_per_iteration == 0
            || raw.max_samples_per_iteration > MAX_SAMPLES_PER_ITERATION
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_samples_per_iteration",
                value: raw.max_samples_per_iteration.to_string(),
                reason: format!("Must be between 1 and {}", MAX_SAMPLES_PER_ITERATION),
            }
            .into());
        }

        Ok(SamplingConfig {
            iteration_time: Duration::from_millis(raw.iteration_time_ms),
            max_samples_per_iteration: raw.max_samples_per_iteration,
        })
    }

    fn validate_sample_budget(
        profile: &ProfileConfig,
        sampling: &SamplingConfig,
    ) -> ValbenchResult<()> {
        if !profile.modes.contains(&BenchmarkMode::SampleTime) {
            return Ok(());
        }

        let budget = profile
            .measurement_iterations
            .saturating_mul(sampling.max_samples_per_iteration as u64);
        if budget > MAX_SAMPLES_PER_RUN {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_samples_per_iteration",
                value: format!(
                    "{} x {} iterations in profile '{}'",
                    sampling.max_samples_per_iteration,
                    profile.measurement_iterations,
                    profile.name
                ),
                reason: format!(
                    "Sample-time runs may record at most {} samples",
                    MAX_SAMPLES_PER_RUN
                ),
            }
            .into());
        }
        Ok(())
    }

    fn validate_profile(raw: RawProfileConfig, index: usize) -> ValbenchResult<ProfileConfig> {
        let context = format!("profile at index {}", index);

        let name = raw
            .name
            .ok_or_else(|| HardValidationError::MissingRequiredField {
                field: "name",
                context: context.clone(),
            })?;
        let name = ProfileName::new(name)?;

        if raw.modes.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "modes",
                value: format!("[] in {}", context),
                reason: "At least one benchmark mode is required".to_string(),
            }
            .into());
        }

        let mut modes = raw.modes;
        modes.sort();
        modes.dedup();

        if raw.measurement_iterations == 0 || raw.measurement_iterations > MAX_MEASUREMENT_ITERATIONS
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "measurement_iterations",
                value: raw.measurement_iterations.to_string(),
                reason: format!("Must be between 1 and {}", MAX_MEASUREMENT_ITERATIONS),
            }
            .into());
        }

        if raw.warmup_iterations > MAX_WARMUP_ITERATIONS {
            return Err(HardValidationError::InvalidFieldValue {
                field: "warmup_iterations",
                value: raw.warmup_iterations.to_string(),
                reason: format!("Must not exceed {}", MAX_WARMUP_ITERATIONS),
            }
            .into());
        }

        Ok(ProfileConfig {
            name,
            modes,
            warmup_iterations: raw.warmup_iterations,
            measurement_iterations: raw.measurement_iterations,
            prewarm: raw.prewarm,
        })
    }
}
