//! LEED score table transforms.
//!
//! - **pivot**: long records to one row per building
//! - **melt**: wide frames back to cells
//! - **filter**: rows for a single LEED version
//! - **verification**: merge certification levels by building name
//! - **frame**: wide frames tagged with their output variant

pub mod error;
pub mod filter;
pub mod frame;
pub mod melt;
pub mod pivot;
pub mod verification;

pub use error::{Result, TransformError};
pub use filter::{distinct_versions, filter_by_version};
pub use frame::WideFrame;
pub use melt::melt_wide;
pub use pivot::{
    ColumnNaming, PREREQUISITE_MARKER, PivotOptions, PivotSummary, Pivoted, ScoreFormat, WideCell,
    column_key, pivot_cells, score_value, to_wide,
};
pub use verification::{MergeOutcome, merge_verification_levels};
