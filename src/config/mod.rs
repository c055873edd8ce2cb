//! Configuration for loading and analysing trial data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::safe_read_to_string;
use crate::error::{Result, TrialError};

/// Default input file used when no path is given
pub const DEFAULT_INPUT_PATH: &str = "clinical_trial_patients.csv";

/// Thresholds and labels used by the responder filter and survival aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum age (inclusive) for a patient to count as responsive
    pub age_threshold: f64,
    /// Cancer type a responsive patient must have (exact, case-sensitive)
    pub target_cancer_type: String,
    /// Treatment label of the active arm
    pub treatment_group: String,
    /// Treatment label of the control arm
    pub control_group: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            age_threshold: 50.0,
            target_cancer_type: "Lung".to_string(),
            treatment_group: "Treatment_A".to_string(),
            control_group: "Control".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file
    ///
    /// Keys missing from the file keep their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "reading analysis configuration")?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded analysis configuration from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Check that thresholds and labels are usable
    pub fn validate(&self) -> Result<()> {
        if !self.age_threshold.is_finite() {
            return Err(TrialError::Config(format!(
                "age_threshold must be finite, got {}",
                self.age_threshold
            )));
        }
        for (name, value) in [
            ("target_cancer_type", &self.target_cancer_type),
            ("treatment_group", &self.treatment_group),
            ("control_group", &self.control_group),
        ] {
            if value.is_empty() {
                return Err(TrialError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Configuration for the dataset loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of rows per record batch
    pub batch_size: usize,
    /// Field delimiter for delimited text input
    pub delimiter: u8,
    /// Number of records to sample for schema inference (`None` reads all)
    ///
    /// Inferred types are widened before reading, so a small window only
    /// affects which columns stay typed as floats.
    pub schema_inference_records: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            delimiter: b',',
            schema_inference_records: None,
        }
    }
}
