// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! JSON report generation for benchmark results.
//!
//! Reports are written as pretty JSON named `<profile>_<timestamp>_<run>.json`.
//! The run suffix is the first block of the report's run id, so two saves in
//! the same second do not collide.

use crate::metrics::BenchmarkReport;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON reporter for benchmark results.
#[derive(Debug)]
pub struct JsonReporter {
    /// Output directory for benchmark data
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter with the specified output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Create a reporter using the default data directory.
    pub fn default_location() -> Result<Self, ReporterError> {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let data_dir = Path::new(manifest_dir).join("data");
        Self::new(data_dir)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save a benchmark report to a JSON file.
    ///
    /// Returns the path to the created file.
    pub fn save(&self, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let mut profiles = report.results.iter().map(|r| r.profile.as_str());
        let label = match profiles.next() {
            Some(first) if profiles.all(|p| p == first) => first,
            Some(_) => "mixed",
            None => "empty",
        };
        self.write(label, report)
    }

    /// Save one file per profile. Every file keeps the report's run id and timestamp.
    pub fn save_by_profile(&self, report: &BenchmarkReport) -> Result<Vec<PathBuf>, ReporterError> {
        let mut by_profile: BTreeMap<&str, Vec<_>> = BTreeMap::new();
        for result in &report.results {
            by_profile
                .entry(result.profile.as_str())
                .or_default()
                .push(result.clone());
        }

        let mut paths = Vec::with_capacity(by_profile.len());
        for (profile, results) in by_profile {
            let profile_report = BenchmarkReport {
                results,
                ..report.clone()
            };
            paths.push(self.write(profile, &profile_report)?);
        }

        Ok(paths)
    }

    fn write(&self, label: &str, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let timestamp = report.timestamp.format("%Y-%m-%dT%H-%M-%SZ");
        let run = report.run_id.simple().to_string();
        let filename = format!("{}_{}_{}.json", label, timestamp, &run[..8]);
        let filepath = self.output_dir.join(filename);

        let file = File::create(&filepath)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;

        tracing::debug!(path = %filepath.display(), results = report.results.len(), "Report written");
        Ok(filepath)
    }

    /// List all existing benchmark files in the output directory.
    pub fn list_reports(&self) -> Result<Vec<PathBuf>, ReporterError> {
        let mut reports = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                reports.push(path);
            }
        }
        reports.sort();
        Ok(reports)
    }

    /// Load an existing benchmark report from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<BenchmarkReport, ReporterError> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}
