//! Survival aggregation by treatment group

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{ClinicalDataset, columns};

/// Running totals for one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Rows carrying the group label
    pub rows: usize,
    /// Rows with a non-null value
    pub count: usize,
    /// Sum of non-null values
    pub sum: f64,
}

impl GroupStats {
    fn push(&mut self, value: Option<f64>) {
        self.rows += 1;
        if let Some(v) = value {
            self.count += 1;
            self.sum += v;
        }
    }

    /// Arithmetic mean of the non-null values, `None` if there are none
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Average survival of the two trial arms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalStats {
    pub avg_survival_treatment_group: f64,
    pub avg_survival_control: f64,
}

/// Partition rows by `group_column` and accumulate `value_column` per group
///
/// Rows with a null group label are dropped; null values are counted as rows
/// but skipped in the mean.
pub fn group_means(
    dataset: &ClinicalDataset,
    group_column: &str,
    value_column: &str,
) -> Result<FxHashMap<String, GroupStats>> {
    dataset.require_columns([group_column, value_column])?;

    let labels = dataset.string_column(group_column)?;
    let values = dataset.float_column(value_column)?;

    let mut groups: FxHashMap<String, GroupStats> = FxHashMap::default();
    for (label, value) in labels.into_iter().zip(values) {
        if let Some(label) = label {
            groups.entry(label).or_default().push(value);
        }
    }

    Ok(groups)
}

/// Mean survival months of the treatment and control arms
///
/// A missing arm, or one without any survival values, averages to 0.
/// Other treatment labels are ignored.
pub fn compute_survival_statistics(
    dataset: &ClinicalDataset,
    config: &AnalysisConfig,
) -> Result<SurvivalStats> {
    let groups = group_means(dataset, columns::TREATMENT, columns::SURVIVAL_MONTHS)?;

    let ignored = groups
        .keys()
        .filter(|label| **label != config.treatment_group && **label != config.control_group)
        .sorted()
        .join(", ");
    if !ignored.is_empty() {
        debug!("Ignoring treatment groups: {ignored}");
    }

    let mean_of = |label: &str| {
        groups
            .get(label)
            .and_then(GroupStats::mean)
            .unwrap_or(0.0)
    };

    Ok(SurvivalStats {
        avg_survival_treatment_group: mean_of(&config.treatment_group),
        avg_survival_control: mean_of(&config.control_group),
    })
}
