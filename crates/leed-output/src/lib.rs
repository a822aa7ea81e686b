//! Output generation for wide LEED tables.
//!
//! The output directory is cleared at the start of a run and every variant
//! is written as its own CSV file.

mod common;
mod csv;
mod error;

pub use common::{clear_output_dir, ensure_output_dir};
pub use csv::{write_csv, write_variant};
pub use error::{OutputError, Result};
