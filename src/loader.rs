//! Clinical trial data loading
//!
//! Reads a patient table into a [`ClinicalDataset`]. Delimited text is the
//! default input format; files with a `.parquet` extension are read with the
//! Parquet Arrow reader instead. No schema checks happen here: columns are
//! validated by the components that use them.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::LoaderConfig;
use crate::error::util::safe_open_file;
use crate::error::{Result, TrialError};
use crate::models::ClinicalDataset;

/// Load a clinical dataset with the default loader configuration
pub fn load_clinical_data(path: &Path) -> Result<ClinicalDataset> {
    load_clinical_data_with_config(path, &LoaderConfig::default())
}

/// Load a clinical dataset from a CSV or Parquet file
///
/// # Errors
/// * [`TrialError::FileAccess`] if the path is missing or unreadable
/// * [`TrialError::Parse`] if the content is not valid tabular data
pub fn load_clinical_data_with_config(
    path: &Path,
    config: &LoaderConfig,
) -> Result<ClinicalDataset> {
    let start = Instant::now();
    let file = safe_open_file(path, "loading clinical trial data")?;

    let dataset = if is_parquet(path) {
        read_parquet(path, file, config)?
    } else {
        read_csv(path, file, config)?
    };

    debug!(
        "Columns in {}: {}",
        path.display(),
        dataset.schema().fields().iter().map(|f| f.name()).join(", ")
    );
    info!(
        "Loaded {} rows in {} batches from {} in {:?}",
        dataset.num_rows(),
        dataset.batches().len(),
        path.display(),
        start.elapsed()
    );

    Ok(dataset)
}

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"))
}

fn read_csv(path: &Path, mut file: File, config: &LoaderConfig) -> Result<ClinicalDataset> {
    let format = Format::default()
        .with_header(true)
        .with_delimiter(config.delimiter);

    let (schema, sampled) = format
        .infer_schema(&mut file, config.schema_inference_records)
        .map_err(|e| TrialError::parse(path, e.to_string()))?;

    if schema.fields().is_empty() {
        return Err(TrialError::parse(path, "no columns found in header row"));
    }
    debug!("Inferred schema from {sampled} records of {}", path.display());

    file.rewind().map_err(|e| TrialError::file_access(path, e))?;

    let schema = Arc::new(widen_schema(&schema));
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_delimiter(config.delimiter)
        .with_batch_size(config.batch_size)
        .build(file)
        .map_err(|e| TrialError::parse(path, e.to_string()))?;

    let batches = reader
        .collect::<std::result::Result<Vec<RecordBatch>, ArrowError>>()
        .map_err(|e| TrialError::parse(path, e.to_string()))?;

    Ok(ClinicalDataset::new(schema, batches))
}

/// Relax inferred CSV types so rows past the inference window always parse
///
/// Only `Float64` and `Utf8` columns keep their type. Integer, boolean,
/// temporal and all-empty (`Null`) columns are read as strings; consumers
/// cast them to the type they need.
fn widen_schema(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| match field.data_type() {
            DataType::Float64 | DataType::Utf8 => field.as_ref().clone(),
            _ => Field::new(field.name(), DataType::Utf8, true),
        })
        .collect();
    Schema::new_with_metadata(fields, schema.metadata().clone())
}

fn read_parquet(path: &Path, file: File, config: &LoaderConfig) -> Result<ClinicalDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| TrialError::parse(path, e.to_string()))?;
    let schema = builder.schema().clone();

    let reader = builder
        .with_batch_size(config.batch_size)
        .build()
        .map_err(|e| TrialError::parse(path, e.to_string()))?;

    let batches = reader
        .collect::<std::result::Result<Vec<RecordBatch>, ArrowError>>()
        .map_err(|e| TrialError::parse(path, e.to_string()))?;

    Ok(ClinicalDataset::new(schema, batches))
}
