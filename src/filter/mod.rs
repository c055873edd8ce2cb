//! Filtering capabilities for clinical datasets
//!
//! An expression-based filtering system that selects rows of Arrow record
//! batches based on column values.

pub mod core;
pub mod expr;

pub use self::core::{BatchFilter, filter_record_batch};
pub use self::expr::{Expr, ExpressionFilter, LiteralValue, evaluate_expr};
