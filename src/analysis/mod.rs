//! Clinical trial analysis pipeline
//!
//! Loads a dataset once, runs the responder filter and the survival
//! aggregator over it, and reports the results.

pub mod responders;
pub mod survival;

use std::fmt;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader::load_clinical_data;

pub use responders::{get_responsive_patients, responder_expr};
pub use survival::{GroupStats, SurvivalStats, compute_survival_statistics, group_means};

/// Outcome of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    /// Responsive patient identifiers in source row order
    pub responsive_patients: Vec<String>,
    pub survival: SurvivalStats,
}

impl TrialReport {
    #[must_use]
    pub fn responsive_count(&self) -> usize {
        self.responsive_patients.len()
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Avg survival (Treatment A): {:?}",
            self.survival.avg_survival_treatment_group
        )?;
        writeln!(
            f,
            "Avg survival (Control): {:?}",
            self.survival.avg_survival_control
        )?;
        write!(f, "Responsive patients: {}", self.responsive_count())
    }
}

/// Load `path` and compute the full report without printing anything
pub fn run_analysis(path: &Path, config: &AnalysisConfig) -> Result<TrialReport> {
    config.validate()?;

    let dataset = load_clinical_data(path)?;
    let responsive_patients = get_responsive_patients(&dataset, config)?;
    let survival = compute_survival_statistics(&dataset, config)?;

    info!(
        "Found {} responsive patients among {} rows",
        responsive_patients.len(),
        dataset.num_rows()
    );

    Ok(TrialReport {
        responsive_patients,
        survival,
    })
}

/// Run the analysis with default thresholds, print the summary and return
/// the responsive patient identifiers
pub fn analyze_clinical_trial(path: impl AsRef<Path>) -> Result<Vec<String>> {
    analyze_clinical_trial_with_config(path, &AnalysisConfig::default())
}

/// Run the analysis with explicit thresholds, print the summary and return
/// the responsive patient identifiers
pub fn analyze_clinical_trial_with_config(
    path: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<Vec<String>> {
    let report = run_analysis(path.as_ref(), config)?;
    println!("{report}");
    Ok(report.responsive_patients)
}
