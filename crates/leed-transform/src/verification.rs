//! Verification-level merge.
//!
//! Buildings are matched to the lookup by exact name: case and surrounding
//! whitespace both count. Mismatches in either
//! direction are reported to the caller rather than failing the merge.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use leed_common::raw_string_column;
use leed_model::{BUILDING_NAME_COLUMN, VERIFICATION_LEVEL_COLUMN, VerificationLookup};

use crate::error::{Result, require_column};

/// A merged frame plus the names that did not line up.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub data: DataFrame,
    /// Buildings in the frame with no lookup entry, in row order.
    pub missing: Vec<String>,
    /// Lookup keys that matched no building, in lookup order.
    pub unmatched_keys: Vec<String>,
}

/// Adds or replaces the `verification_level` column.
pub fn merge_verification_levels(
    df: &DataFrame,
    lookup: &VerificationLookup,
) -> Result<MergeOutcome> {
    require_column(df, BUILDING_NAME_COLUMN)?;
    let names = raw_string_column(df, BUILDING_NAME_COLUMN)?;

    let mut missing = Vec::new();
    let levels: Vec<Option<String>> = names
        .iter()
        .map(|name| match lookup.get(name) {
            Some(level) => Some(level.to_string()),
            None => {
                missing.push(name.clone());
                None
            }
        })
        .collect();

    let present: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    let unmatched_keys: Vec<String> = lookup
        .iter()
        .filter(|(name, _)| !present.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();

    let mut data = df.clone();
    data.with_column(Series::new(VERIFICATION_LEVEL_COLUMN.into(), levels))?;

    debug!(
        buildings = names.len(),
        missing = missing.len(),
        unmatched = unmatched_keys.len(),
        "merged verification levels"
    );

    Ok(MergeOutcome {
        data,
        missing,
        unmatched_keys,
    })
}
