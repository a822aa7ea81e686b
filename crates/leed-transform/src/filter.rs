//! Row filtering by LEED version.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::debug;

use leed_common::raw_string_column;
use leed_model::LEED_VERSION_COLUMN;

use crate::error::{Result, require_column};

/// Keeps the rows whose `leed_version` equals `version` exactly, whitespace included.
///
/// No match yields an empty frame with the same columns.
pub fn filter_by_version(df: &DataFrame, version: &str) -> Result<DataFrame> {
    require_column(df, LEED_VERSION_COLUMN)?;
    let mask: Vec<bool> = raw_string_column(df, LEED_VERSION_COLUMN)?
        .iter()
        .map(|value| value == version)
        .collect();
    let mask = BooleanChunked::from_slice("keep".into(), &mask);
    let filtered = df.filter(&mask)?;
    debug!(
        version,
        kept = filtered.height(),
        total = df.height(),
        "filtered by version"
    );
    Ok(filtered)
}

/// Sorted distinct non-empty versions present in the frame.
pub fn distinct_versions(df: &DataFrame) -> Result<Vec<String>> {
    require_column(df, LEED_VERSION_COLUMN)?;
    let versions: BTreeSet<String> = raw_string_column(df, LEED_VERSION_COLUMN)?
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect();
    Ok(versions.into_iter().collect())
}
