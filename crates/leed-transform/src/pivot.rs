//! Long-to-wide pivot.
//!
//! Every long record becomes one [`WideCell`] keyed by building and column;
//! [`pivot_cells`] then lays the cells out as one row per building. Rows are
//! sorted by building name and score columns lexically, so the same input
//! always produces the same frame.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{debug, warn};

use leed_common::format_numeric;
use leed_model::{
    BUILDING_NAME_COLUMN, LEED_VERSION_COLUMN, LongRecord, OutputVariant, VERIFICATION_LEVEL_COLUMN,
};

use crate::error::{Result, TransformError};

/// Columns a score column may not be named after.
const KEY_COLUMNS: [&str; 3] = [
    BUILDING_NAME_COLUMN,
    LEED_VERSION_COLUMN,
    VERIFICATION_LEVEL_COLUMN,
];

/// Cell value written for a `0/0` score in [`ScoreFormat::Fraction`].
pub const PREREQUISITE_MARKER: &str = "prerequisite";

/// How a long record's score column is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnNaming {
    /// Category code, e.g. `EA`.
    #[default]
    Category,
    /// `"{category} - {credit_name}"`, or the category alone when the credit
    /// name is empty.
    CategoryAndCredit,
    /// `"{category}({points_available})v{leed_version}"`.
    Versioned,
}

/// How a long record's points become a cell value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreFormat {
    /// Points earned.
    #[default]
    Earned,
    /// `"{earned}/{available}"`, with `0/0` written as `prerequisite`.
    Fraction,
    /// Earned divided by available; null when nothing was available.
    Ratio,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PivotOptions {
    /// Keep only category subtotal records.
    pub categories_only: bool,
    pub column_naming: ColumnNaming,
    pub score_format: ScoreFormat,
}

impl PivotOptions {
    /// Category subtotals keyed by category code.
    pub fn categories() -> Self {
        Self {
            categories_only: true,
            column_naming: ColumnNaming::Category,
            score_format: ScoreFormat::Earned,
        }
    }

    /// Every record kind keyed by category and credit.
    pub fn full() -> Self {
        Self {
            categories_only: false,
            column_naming: ColumnNaming::CategoryAndCredit,
            score_format: ScoreFormat::Earned,
        }
    }

    /// Default options for an output variant.
    pub fn for_variant(variant: &OutputVariant) -> Self {
        if variant.categories_only() {
            Self::categories()
        } else {
            Self::full()
        }
    }

    #[must_use]
    pub fn with_column_naming(mut self, naming: ColumnNaming) -> Self {
        self.column_naming = naming;
        self
    }

    #[must_use]
    pub fn with_score_format(mut self, format: ScoreFormat) -> Self {
        self.score_format = format;
        self
    }
}

/// One cell of a wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideCell {
    pub building_name: String,
    /// Empty when the building has no known version.
    pub leed_version: String,
    pub column: String,
    pub value: Option<String>,
}

/// Counters reported by a pivot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PivotSummary {
    pub buildings: usize,
    pub score_columns: usize,
    /// Cells overwritten by a later record for the same building and column.
    pub duplicates: usize,
    /// Buildings whose records disagreed on the LEED version.
    pub version_conflicts: usize,
}

/// A pivoted frame plus its counters.
#[derive(Debug, Clone)]
pub struct Pivoted {
    pub data: DataFrame,
    pub summary: PivotSummary,
}

/// Pivots long records into one row per building.
pub fn to_wide(records: &[LongRecord], options: &PivotOptions) -> Result<Pivoted> {
    let cells: Vec<WideCell> = records
        .iter()
        .filter(|record| !options.categories_only || record.data_type.is_category())
        .map(|record| WideCell {
            building_name: record.building_name.clone(),
            leed_version: record.leed_version.clone(),
            column: column_key(record, options.column_naming),
            value: score_value(record, options.score_format),
        })
        .collect();

    let pivoted = pivot_with_summary(&cells)?;
    debug!(
        records = records.len(),
        cells = cells.len(),
        buildings = pivoted.summary.buildings,
        columns = pivoted.summary.score_columns,
        "pivoted long records"
    );
    Ok(pivoted)
}

/// Lays cells out as a wide frame.
///
/// Columns are `building_name`, the distinct cell columns in lexical order,
/// then `leed_version`. A later cell for the same building and column
/// replaces the earlier one; the first non-empty version per building wins.
pub fn pivot_cells(cells: &[WideCell]) -> Result<DataFrame> {
    Ok(pivot_with_summary(cells)?.data)
}

#[derive(Default)]
struct BuildingRow {
    version: String,
    values: BTreeMap<String, Option<String>>,
}

fn pivot_with_summary(cells: &[WideCell]) -> Result<Pivoted> {
    let mut rows: BTreeMap<&str, BuildingRow> = BTreeMap::new();
    let mut columns: BTreeSet<&str> = BTreeSet::new();
    let mut summary = PivotSummary::default();
    let mut conflicted: BTreeSet<&str> = BTreeSet::new();

    for cell in cells {
        if KEY_COLUMNS.contains(&cell.column.as_str()) {
            return Err(TransformError::ReservedColumn {
                column: cell.column.clone(),
            });
        }
        let row = rows.entry(cell.building_name.as_str()).or_default();
        if row.version.is_empty() {
            row.version = cell.leed_version.clone();
        } else if !cell.leed_version.is_empty()
            && cell.leed_version != row.version
            && conflicted.insert(cell.building_name.as_str())
        {
            warn!(
                building = %cell.building_name,
                kept = %row.version,
                ignored = %cell.leed_version,
                "conflicting LEED versions for building, keeping first"
            );
        }

        columns.insert(cell.column.as_str());
        if row
            .values
            .insert(cell.column.clone(), cell.value.clone())
            .is_some()
        {
            summary.duplicates += 1;
        }
    }

    if summary.duplicates > 0 {
        warn!(
            duplicates = summary.duplicates,
            "duplicate building/column records, later values kept"
        );
    }

    summary.buildings = rows.len();
    summary.score_columns = columns.len();
    summary.version_conflicts = conflicted.len();

    let names: Vec<Option<String>> = rows.keys().map(|name| Some(name.to_string())).collect();
    let versions: Vec<Option<String>> = rows
        .values()
        .map(|row| Some(row.version.clone()).filter(|v| !v.is_empty()))
        .collect();

    let mut frame_columns: Vec<Column> = Vec::with_capacity(columns.len() + 2);
    frame_columns.push(Series::new(BUILDING_NAME_COLUMN.into(), names).into_column());
    for column in &columns {
        let values: Vec<Option<String>> = rows
            .values()
            .map(|row| row.values.get(*column).cloned().flatten())
            .collect();
        frame_columns.push(Series::new((*column).into(), values).into_column());
    }
    frame_columns.push(Series::new(LEED_VERSION_COLUMN.into(), versions).into_column());

    Ok(Pivoted {
        data: DataFrame::new(frame_columns)?,
        summary,
    })
}

/// Column key for a record under the given naming scheme.
pub fn column_key(record: &LongRecord, naming: ColumnNaming) -> String {
    match naming {
        ColumnNaming::Category => record.category.clone(),
        ColumnNaming::CategoryAndCredit => {
            if record.credit_name.is_empty() {
                record.category.clone()
            } else {
                format!("{} - {}", record.category, record.credit_name)
            }
        }
        ColumnNaming::Versioned => match record.points_available {
            Some(available) => format!(
                "{}({})v{}",
                record.category,
                format_numeric(available),
                record.leed_version
            ),
            None => format!("{}v{}", record.category, record.leed_version),
        },
    }
}

/// Cell value for a record under the given score format.
pub fn score_value(record: &LongRecord, format: ScoreFormat) -> Option<String> {
    match format {
        ScoreFormat::Earned => record.points_earned.map(format_numeric),
        ScoreFormat::Fraction => {
            if record.is_zero_of_zero() {
                return Some(PREREQUISITE_MARKER.to_string());
            }
            match (record.points_earned, record.points_available) {
                (Some(earned), Some(available)) => Some(format!(
                    "{}/{}",
                    format_numeric(earned),
                    format_numeric(available)
                )),
                (Some(earned), None) => Some(format_numeric(earned)),
                (None, _) => None,
            }
        }
        ScoreFormat::Ratio => match (record.points_earned, record.points_available) {
            (Some(earned), Some(available)) if available != 0.0 => {
                Some(format_numeric(earned / available))
            }
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use leed_common::string_column;
    use leed_model::DataType;

    use super::*;

    fn credit(building: &str, category: &str, credit: &str, earned: f64, available: f64) -> LongRecord {
        LongRecord {
            credit_name: credit.to_string(),
            data_type: DataType::Credit,
            ..LongRecord::category(building, category, earned, available, "4.0")
        }
    }

    #[test]
    fn column_key_schemes() {
        let record = credit("Tucker Hall", "EA", "Optimize Energy Performance", 8.0, 18.0);
        assert_eq!(column_key(&record, ColumnNaming::Category), "EA");
        assert_eq!(
            column_key(&record, ColumnNaming::CategoryAndCredit),
            "EA - Optimize Energy Performance"
        );
        assert_eq!(column_key(&record, ColumnNaming::Versioned), "EA(18)v4.0");

        let bare = LongRecord::category("Tucker Hall", "EA", 8.0, 18.0, "4.0");
        assert_eq!(column_key(&bare, ColumnNaming::CategoryAndCredit), "EA");
    }

    #[test]
    fn score_formats() {
        let record = LongRecord::category("Tucker Hall", "EA", 5.0, 10.0, "4.0");
        assert_eq!(score_value(&record, ScoreFormat::Earned).as_deref(), Some("5"));
        assert_eq!(score_value(&record, ScoreFormat::Fraction).as_deref(), Some("5/10"));
        assert_eq!(score_value(&record, ScoreFormat::Ratio).as_deref(), Some("0.5"));

        let prereq = LongRecord::category("Tucker Hall", "SS", 0.0, 0.0, "4.0");
        assert_eq!(
            score_value(&prereq, ScoreFormat::Fraction).as_deref(),
            Some(PREREQUISITE_MARKER)
        );
        assert_eq!(score_value(&prereq, ScoreFormat::Ratio), None);
    }

    #[test]
    fn categories_only_drops_credits() {
        let records = vec![
            LongRecord::category("Tucker Hall", "EA", 12.0, 33.0, "4.0"),
            credit("Tucker Hall", "EA", "Optimize Energy Performance", 8.0, 18.0),
        ];
        let pivoted = to_wide(&records, &PivotOptions::categories()).unwrap();
        assert_eq!(pivoted.data.width(), 3);
        assert_eq!(pivoted.summary.duplicates, 0);

        let full = to_wide(&records, &PivotOptions::full()).unwrap();
        assert_eq!(full.data.width(), 4);
    }

    #[test]
    fn duplicates_keep_last_value() {
        let records = vec![
            LongRecord::category("Tucker Hall", "EA", 5.0, 10.0, "4.0"),
            LongRecord::category("Tucker Hall", "EA", 7.0, 10.0, "4.0"),
        ];
        let pivoted = to_wide(&records, &PivotOptions::categories()).unwrap();
        assert_eq!(pivoted.summary.duplicates, 1);
        assert_eq!(string_column(&pivoted.data, "EA").unwrap(), vec!["7"]);
    }

    #[test]
    fn first_non_empty_version_wins() {
        let records = vec![
            LongRecord::category("Tucker Hall", "EA", 5.0, 10.0, ""),
            LongRecord::category("Tucker Hall", "WE", 2.0, 10.0, "3.0"),
            LongRecord::category("Tucker Hall", "MR", 1.0, 10.0, "4.0"),
        ];
        let pivoted = to_wide(&records, &PivotOptions::categories()).unwrap();
        assert_eq!(pivoted.summary.version_conflicts, 1);
        assert_eq!(
            string_column(&pivoted.data, LEED_VERSION_COLUMN).unwrap(),
            vec!["3.0"]
        );
    }

    #[test]
    fn category_named_like_a_key_column_is_rejected() {
        for reserved in [BUILDING_NAME_COLUMN, LEED_VERSION_COLUMN, VERIFICATION_LEVEL_COLUMN] {
            let records = vec![LongRecord::category("Tucker Hall", reserved, 1.0, 2.0, "4.0")];
            let err = to_wide(&records, &PivotOptions::categories()).unwrap_err();
            assert!(
                matches!(&err, TransformError::ReservedColumn { column } if column == reserved),
                "{err}"
            );
        }
    }

    #[test]
    fn empty_input_keeps_key_columns() {
        let pivoted = to_wide(&[], &PivotOptions::categories()).unwrap();
        assert_eq!(pivoted.data.height(), 0);
        assert_eq!(pivoted.data.width(), 2);
    }
}
