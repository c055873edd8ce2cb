//! Utilities for working with Arrow arrays.
//!
//! Columns are fetched by name and adapted to the type a component needs,
//! so CSV files whose numeric columns were inferred as integers or strings
//! can still be compared as floating point values.

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::warn;

use crate::error::{Result, TrialError};

/// Get a column from a record batch, cast to `expected_type` when necessary
///
/// Values that cannot be represented in the target type become null.
///
/// # Errors
/// Returns [`TrialError::MissingColumn`] if the column does not exist, or
/// [`TrialError::InvalidDataType`] if no cast between the types exists.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(column.clone());
    }

    let converted = cast(column, expected_type).map_err(|_| TrialError::InvalidDataType {
        column: column_name.to_string(),
        expected: expected_type.to_string(),
    })?;

    let lost = converted.null_count().saturating_sub(column.null_count());
    if lost > 0 {
        warn!(
            "{lost} value(s) in column '{column_name}' could not be converted from {actual_type} to {expected_type} and are treated as missing"
        );
    }

    Ok(converted)
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| TrialError::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Get the column index by name from a record batch
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| TrialError::missing_column(column_name))
}

/// Read a column as nullable floats
pub fn float_values(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<f64>>> {
    let array = get_column(batch, column_name, &DataType::Float64)?;
    let floats = downcast_array::<Float64Array>(&array, column_name, "Float64")?;
    Ok(floats.iter().collect())
}

/// Read a column as nullable strings
pub fn string_values(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<String>>> {
    let array = get_column(batch, column_name, &DataType::Utf8)?;
    let strings = downcast_array::<StringArray>(&array, column_name, "Utf8")?;
    Ok(strings.iter().map(|v| v.map(str::to_string)).collect())
}
