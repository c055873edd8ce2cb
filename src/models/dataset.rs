//! In-memory clinical dataset backed by Arrow record batches

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use itertools::{Itertools, izip};

use crate::error::{Result, TrialError};
use crate::filter::core::BatchFilter;
use crate::models::{ClinicalRecord, columns};
use crate::utils::{float_values, string_values};

/// An ordered, immutable table of patient rows
#[derive(Debug, Clone)]
pub struct ClinicalDataset {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl ClinicalDataset {
    /// Wrap record batches that all share `schema`
    #[must_use]
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// Create a dataset with a header but no rows
    #[must_use]
    pub fn empty(schema: SchemaRef) -> Self {
        Self::new(schema, Vec::new())
    }

    /// Schema of the clinical record columns, all nullable
    #[must_use]
    pub fn record_schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new(columns::PATIENT_ID, DataType::Utf8, true),
            Field::new(columns::AGE, DataType::Float64, true),
            Field::new(columns::CANCER_TYPE, DataType::Utf8, true),
            Field::new(columns::BASELINE_TUMOR_SIZE, DataType::Float64, true),
            Field::new(columns::FINAL_TUMOR_SIZE, DataType::Float64, true),
            Field::new(columns::TREATMENT, DataType::Utf8, true),
            Field::new(columns::SURVIVAL_MONTHS, DataType::Float64, true),
        ]))
    }

    /// Build a dataset from typed records, preserving their order
    pub fn from_records(records: &[ClinicalRecord]) -> Result<Self> {
        let schema = Self::record_schema();
        if records.is_empty() {
            return Ok(Self::empty(schema));
        }

        let strings = |f: fn(&ClinicalRecord) -> Option<&str>| -> ArrayRef {
            Arc::new(records.iter().map(f).collect::<StringArray>())
        };
        let floats = |f: fn(&ClinicalRecord) -> Option<f64>| -> ArrayRef {
            Arc::new(records.iter().map(f).collect::<Float64Array>())
        };

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                strings(|r| r.patient_id.as_deref()),
                floats(|r| r.age),
                strings(|r| r.cancer_type.as_deref()),
                floats(|r| r.baseline_tumor_size),
                floats(|r| r.final_tumor_size),
                strings(|r| r.treatment.as_deref()),
                floats(|r| r.survival_months),
            ],
        )?;

        Ok(Self::new(schema, vec![batch]))
    }

    #[must_use]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    #[must_use]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total number of rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.schema.index_of(name).is_ok()
    }

    /// Fail with [`TrialError::MissingColumn`] for the first absent column
    ///
    /// Checked against the schema, so a dataset without rows still reports
    /// missing columns.
    pub fn require_columns<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        match names.into_iter().find(|name| !self.has_column(name)) {
            Some(name) => Err(TrialError::missing_column(name)),
            None => Ok(()),
        }
    }

    /// Apply a batch filter to every batch, keeping row order
    pub fn filter(&self, filter: &dyn BatchFilter) -> Result<Self> {
        let required = filter.required_columns();
        self.require_columns(required.iter().map(String::as_str).sorted())?;

        let mut batches = Vec::with_capacity(self.batches.len());
        for batch in &self.batches {
            let filtered = filter.filter(batch)?;
            if filtered.num_rows() > 0 {
                batches.push(filtered);
            }
        }

        Ok(Self::new(self.schema.clone(), batches))
    }

    /// All values of a column read as nullable floats
    pub fn float_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        self.require_columns([name])?;
        let mut values = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            values.extend(float_values(batch, name)?);
        }
        Ok(values)
    }

    /// All values of a column read as nullable strings
    pub fn string_column(&self, name: &str) -> Result<Vec<Option<String>>> {
        self.require_columns([name])?;
        let mut values = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            values.extend(string_values(batch, name)?);
        }
        Ok(values)
    }

    /// Project every row into a [`ClinicalRecord`]
    ///
    /// Extra columns are ignored; any missing record column is an error.
    pub fn records(&self) -> Result<Vec<ClinicalRecord>> {
        self.require_columns(columns::ALL)?;

        let records = izip!(
            self.string_column(columns::PATIENT_ID)?,
            self.float_column(columns::AGE)?,
            self.string_column(columns::CANCER_TYPE)?,
            self.float_column(columns::BASELINE_TUMOR_SIZE)?,
            self.float_column(columns::FINAL_TUMOR_SIZE)?,
            self.string_column(columns::TREATMENT)?,
            self.float_column(columns::SURVIVAL_MONTHS)?,
        )
        .map(
            |(patient_id, age, cancer_type, baseline, final_size, treatment, survival)| {
                ClinicalRecord {
                    patient_id,
                    age,
                    cancer_type,
                    baseline_tumor_size: baseline,
                    final_tumor_size: final_size,
                    treatment,
                    survival_months: survival,
                }
            },
        )
        .collect();

        Ok(records)
    }
}
