//! Responder selection
//!
//! A responsive patient is old enough, has the target cancer type and had
//! their tumor shrink between the baseline and final measurement.

use log::debug;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::filter::expr::{Expr, ExpressionFilter, LiteralValue};
use crate::models::{ClinicalDataset, columns};

/// Build the responder expression for a configuration
#[must_use]
pub fn responder_expr(config: &AnalysisConfig) -> Expr {
    Expr::And(vec![
        Expr::GtEq(
            columns::AGE.to_string(),
            LiteralValue::Float(config.age_threshold),
        ),
        Expr::Eq(
            columns::CANCER_TYPE.to_string(),
            LiteralValue::String(config.target_cancer_type.clone()),
        ),
        Expr::ColumnLt(
            columns::FINAL_TUMOR_SIZE.to_string(),
            columns::BASELINE_TUMOR_SIZE.to_string(),
        ),
    ])
}

/// Identifiers of responsive patients, in source row order
///
/// Duplicated identifiers are kept; rows with an empty identifier are skipped.
///
/// # Errors
/// Returns [`crate::error::TrialError::MissingColumn`] if `patient_id` or
/// any column used by the predicates is absent.
pub fn get_responsive_patients(
    dataset: &ClinicalDataset,
    config: &AnalysisConfig,
) -> Result<Vec<String>> {
    dataset.require_columns([columns::PATIENT_ID])?;

    let filter = ExpressionFilter::new(responder_expr(config));
    let responders = dataset.filter(&filter)?;
    debug!(
        "Responder filter kept {} of {} rows",
        responders.num_rows(),
        dataset.num_rows()
    );

    Ok(responders
        .string_column(columns::PATIENT_ID)?
        .into_iter()
        .flatten()
        .collect())
}
