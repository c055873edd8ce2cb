//! Expression-based filtering for clinical record batches
//!
//! Expressions compare columns against literals (or against other columns)
//! using Arrow's vectorized compare kernels. Comparisons involving a null
//! value yield null, and null rows never pass a filter.

use std::collections::HashSet;

use arrow::array::{Array, BooleanArray, Float64Array, StringArray};
use arrow::compute::kernels::boolean::and_kleene;
use arrow::compute::kernels::cmp::{eq, gt_eq, lt};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::utils::get_column;

/// Represents a filter expression over the columns of a dataset
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),

    /// Column is greater than or equal to a literal value
    GtEq(String, LiteralValue),

    /// Left column is numerically less than right column in the same row
    ColumnLt(String, String),

    /// Logical AND of expressions
    And(Vec<Expr>),
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Floating point value
    Float(f64),

    /// String value, compared exactly
    String(String),
}

impl Expr {
    /// Returns a set of all column names required by this expression
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_required_columns(&mut columns);
        columns
    }

    fn collect_required_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::Eq(col, _) | Self::GtEq(col, _) => {
                columns.insert(col.clone());
            }
            Self::ColumnLt(left, right) => {
                columns.insert(left.clone());
                columns.insert(right.clone());
            }
            Self::And(exprs) => {
                for expr in exprs {
                    expr.collect_required_columns(columns);
                }
            }
        }
    }
}

/// A filter that evaluates an expression against a record batch
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }

    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the expression into a selection mask without nulls
    pub fn evaluate(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let mask = evaluate_expr(batch, &self.expr)?;
        if mask.null_count() == 0 {
            return Ok(mask);
        }
        Ok(mask.iter().map(|v| Some(v.unwrap_or(false))).collect())
    }
}

impl BatchFilter for ExpressionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.evaluate(batch)?;
        filter_record_batch(batch, &mask)
    }

    fn required_columns(&self) -> HashSet<String> {
        self.expr.required_columns()
    }
}

/// Evaluate an expression against a record batch with three-valued logic
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::Eq(col, LiteralValue::String(s)) => {
            let column = get_column(batch, col, &DataType::Utf8)?;
            Ok(eq(&column, &StringArray::new_scalar(s.as_str()))?)
        }
        Expr::Eq(col, LiteralValue::Float(f)) => {
            let column = get_column(batch, col, &DataType::Float64)?;
            Ok(eq(&column, &Float64Array::new_scalar(*f))?)
        }
        Expr::GtEq(col, LiteralValue::String(s)) => {
            let column = get_column(batch, col, &DataType::Utf8)?;
            Ok(gt_eq(&column, &StringArray::new_scalar(s.as_str()))?)
        }
        Expr::GtEq(col, LiteralValue::Float(f)) => {
            let column = get_column(batch, col, &DataType::Float64)?;
            Ok(gt_eq(&column, &Float64Array::new_scalar(*f))?)
        }
        Expr::ColumnLt(left, right) => {
            let lhs = get_column(batch, left, &DataType::Float64)?;
            let rhs = get_column(batch, right, &DataType::Float64)?;
            Ok(lt(&lhs, &rhs)?)
        }
        Expr::And(exprs) => {
            let mut result = BooleanArray::from(vec![true; batch.num_rows()]);
            for expr in exprs {
                result = and_kleene(&result, &evaluate_expr(batch, expr)?)?;
            }
            Ok(result)
        }
    }
}
