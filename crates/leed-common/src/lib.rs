//! Shared utilities for the LEED transpiler crates.
//!
//! This crate provides the Polars helpers used across the workspace:
//! `AnyValue` conversion, numeric formatting, and string column access.

pub mod dataframe;

// Re-export commonly used functions at crate root for convenience
pub use dataframe::{
    any_to_string, any_to_string_non_empty, column_names, format_numeric, parse_f64,
    raw_string_column, string_column, string_column_opt,
};
