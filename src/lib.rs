//! A Rust library for analysing clinical-trial patient tables: selecting
//! responsive patients and averaging survival by treatment arm.

pub mod analysis;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{AnalysisConfig, DEFAULT_INPUT_PATH, LoaderConfig};
pub use error::{Result, TrialError};
pub use models::{ClinicalDataset, ClinicalRecord};

// Pipeline
pub use analysis::{
    SurvivalStats, TrialReport, analyze_clinical_trial, analyze_clinical_trial_with_config,
    compute_survival_statistics, get_responsive_patients, run_analysis,
};
pub use loader::{load_clinical_data, load_clinical_data_with_config};

// Filtering capabilities
pub use filter::{BatchFilter, Expr, ExpressionFilter, LiteralValue};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;
