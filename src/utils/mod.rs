//! Shared helpers for Arrow column access.

pub mod arrow_utils;

pub use arrow_utils::{downcast_array, float_values, get_column, get_column_index, string_values};
