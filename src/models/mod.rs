//! Clinical trial data models
//!
//! [`ClinicalRecord`] is the typed view of one patient row and
//! [`ClinicalDataset`] the in-memory table the analysis components read.

pub mod dataset;

use serde::{Deserialize, Serialize};

pub use dataset::ClinicalDataset;

/// Column names expected in the input header
pub mod columns {
    pub const PATIENT_ID: &str = "patient_id";
    pub const AGE: &str = "age";
    pub const CANCER_TYPE: &str = "cancer_type";
    pub const BASELINE_TUMOR_SIZE: &str = "baseline_tumor_size";
    pub const FINAL_TUMOR_SIZE: &str = "final_tumor_size";
    pub const TREATMENT: &str = "treatment";
    pub const SURVIVAL_MONTHS: &str = "survival_months";

    /// All columns of a clinical record, in header order
    pub const ALL: [&str; 7] = [
        PATIENT_ID,
        AGE,
        CANCER_TYPE,
        BASELINE_TUMOR_SIZE,
        FINAL_TUMOR_SIZE,
        TREATMENT,
        SURVIVAL_MONTHS,
    ];
}

/// One patient row of a clinical trial table
///
/// Every field is optional because any cell of the input may be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub patient_id: Option<String>,
    pub age: Option<f64>,
    pub cancer_type: Option<String>,
    pub baseline_tumor_size: Option<f64>,
    pub final_tumor_size: Option<f64>,
    pub treatment: Option<String>,
    pub survival_months: Option<f64>,
}

impl ClinicalRecord {
    /// Create a fully populated record
    #[must_use]
    pub fn new(
        patient_id: &str,
        age: f64,
        cancer_type: &str,
        baseline_tumor_size: f64,
        final_tumor_size: f64,
        treatment: &str,
        survival_months: f64,
    ) -> Self {
        Self {
            patient_id: Some(patient_id.to_string()),
            age: Some(age),
            cancer_type: Some(cancer_type.to_string()),
            baseline_tumor_size: Some(baseline_tumor_size),
            final_tumor_size: Some(final_tumor_size),
            treatment: Some(treatment.to_string()),
            survival_months: Some(survival_months),
        }
    }

    /// Whether the tumor shrank between baseline and final measurement
    ///
    /// Missing measurements count as no shrinkage.
    #[must_use]
    pub fn tumor_shrank(&self) -> bool {
        matches!(
            (self.final_tumor_size, self.baseline_tumor_size),
            (Some(final_size), Some(baseline)) if final_size < baseline
        )
    }
}
