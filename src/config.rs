//! Monitor configuration.
//!
//! Holds the output folder, the input collection tag, the high-quality
//! selection thresholds, and the named axis-binning sets the histogram
//! battery is booked with.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::ClassifierThresholds;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// A histogram references a binning set the configuration does not define.
    #[error("Unknown binning set '{0}'")]
    UnknownBinning(String),

    /// The configuration file extension is not recognized.
    #[error("Unsupported config file extension: '{0}' (expected .yaml, .yml, or .json)")]
    UnsupportedExtension(String),

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Uniform binning for one histogram axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBinning {
    /// Number of bins.
    pub bins: u32,

    /// Lower edge of the first bin.
    pub min: f64,

    /// Upper edge of the last bin.
    pub max: f64,
}

impl AxisBinning {
    /// Creates a binning set.
    pub fn new(bins: u32, min: f64, max: f64) -> Self {
        Self { bins, min, max }
    }
}

/// Configuration for the track monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Folder path all histograms are booked under.
    pub top_folder: String,

    /// Tag of the input track collection.
    pub tracks_tag: String,

    /// Minimum stub count for the high-quality selection.
    pub min_stubs: u32,

    /// Maximum chi-square per degree of freedom for the high-quality
    /// selection.
    pub max_chi2_dof: f64,

    /// Named axis-binning sets referenced by the histogram battery.
    pub binning: BTreeMap<String, AxisBinning>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            top_folder: "Tracker/L1Tracks".to_string(),
            tracks_tag: "l1_tracks".to_string(),
            min_stubs: 4,
            max_chi2_dof: 10.0,
            binning: default_binning(),
        }
    }
}

/// Binning defaults covering every set the histogram battery references.
///
/// Integer-valued axes (track and stub multiplicities) are shifted by half
/// a bin so integers land in bin centers.
fn default_binning() -> BTreeMap<String, AxisBinning> {
    let defaults = [
        ("n_tracks", AxisBinning::new(100, -0.5, 99.5)),
        ("n_stubs", AxisBinning::new(15, -0.5, 14.5)),
        ("pt", AxisBinning::new(50, 0.0, 100.0)),
        ("eta", AxisBinning::new(60, -3.0, 3.0)),
        ("phi", AxisBinning::new(64, -3.2, 3.2)),
        ("vtx_z", AxisBinning::new(60, -30.0, 30.0)),
        ("d0", AxisBinning::new(50, 0.0, 5.0)),
        ("chi2", AxisBinning::new(100, 0.0, 100.0)),
        ("chi2_dof", AxisBinning::new(100, 0.0, 50.0)),
        ("chi2_prob", AxisBinning::new(50, 0.0, 1.0)),
    ];

    defaults
        .into_iter()
        .map(|(key, binning)| (key.to_string(), binning))
        .collect()
}

impl MonitorConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file, dispatching on the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            other => Err(ConfigError::UnsupportedExtension(
                other.unwrap_or("").to_string(),
            )),
        }
    }

    /// The high-quality selection thresholds.
    pub fn thresholds(&self) -> ClassifierThresholds {
        ClassifierThresholds {
            min_stubs: self.min_stubs,
            max_chi2_dof: self.max_chi2_dof,
        }
    }

    /// Resolves a named binning set.
    pub fn axis(&self, key: &str) -> Result<&AxisBinning, ConfigError> {
        self.binning
            .get(key)
            .ok_or_else(|| ConfigError::UnknownBinning(key.to_string()))
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_folder.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "top_folder cannot be empty".to_string(),
            ));
        }

        if self.tracks_tag.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "tracks_tag cannot be empty".to_string(),
            ));
        }

        if !self.max_chi2_dof.is_finite() || self.max_chi2_dof < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "max_chi2_dof must be finite and non-negative".to_string(),
            ));
        }

        for (key, binning) in &self.binning {
            if binning.bins == 0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "binning set '{}' must have at least one bin",
                    key
                )));
            }
            if !binning.min.is_finite() || !binning.max.is_finite() || binning.min >= binning.max {
                return Err(ConfigError::ValidationFailed(format!(
                    "binning set '{}' must have finite ordered edges",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Builder method to set the top folder.
    pub fn with_top_folder(mut self, folder: impl Into<String>) -> Self {
        self.top_folder = folder.into();
        self
    }

    /// Builder method to set the input collection tag.
    pub fn with_tracks_tag(mut self, tag: impl Into<String>) -> Self {
        self.tracks_tag = tag.into();
        self
    }

    /// Builder method to set the minimum stub count.
    pub fn with_min_stubs(mut self, min_stubs: u32) -> Self {
        self.min_stubs = min_stubs;
        self
    }

    /// Builder method to set the maximum chi-square per degree of freedom.
    pub fn with_max_chi2_dof(mut self, max_chi2_dof: f64) -> Self {
        self.max_chi2_dof = max_chi2_dof;
        self
    }

    /// Builder method to override one binning set.
    pub fn with_binning(mut self, key: impl Into<String>, binning: AxisBinning) -> Self {
        self.binning.insert(key.into(), binning);
        self
    }
}
