//! Source cleaning: raw export rows to typed long records.
//!
//! The raw export names columns after the spreadsheet it came from
//! (`cat_code`, `awarded_points`, `type`, ...). Cleaning resolves those
//! columns, joins the building reference table, normalises versions, and
//! parses points into numbers.

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use leed_common::{column_names, parse_f64, string_column_opt};
use leed_model::{DataType, LongRecord};

use crate::buildings::BuildingIndex;
use crate::error::{IngestError, Result};
use crate::table::CsvHeaders;
use crate::version::normalize_leed_version;

/// What to do with a row that cannot become a long record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRowPolicy {
    /// Drop the row and log a warning.
    #[default]
    Skip,
    /// Abort cleaning with [`IngestError::MalformedRow`].
    Fail,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    pub malformed_rows: MalformedRowPolicy,
}

impl CleanOptions {
    #[must_use]
    pub fn with_malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }
}

/// A row dropped under [`MalformedRowPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row number (the header is not counted).
    pub row: usize,
    pub reason: String,
}

/// Output of [`clean_leed_data`].
#[derive(Debug, Clone, Default)]
pub struct CleanedData {
    pub records: Vec<LongRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Source column names resolved against the export's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumns {
    pub building_code: Option<String>,
    pub building_name: Option<String>,
    pub category: String,
    pub credit_name: Option<String>,
    pub points_earned: Option<String>,
    pub points_available: Option<String>,
    pub data_type: String,
    pub leed_version: Option<String>,
}

impl SourceColumns {
    /// Resolves accepted spellings; fails when a required column is absent.
    pub fn resolve(headers: &CsvHeaders) -> Result<Self> {
        let find = |names: &[&str]| headers.find_any(names).map(str::to_string);
        let building_code = find(&["building_code"]);
        let building_name = find(&["building_name"]);
        if building_code.is_none() && building_name.is_none() {
            return Err(IngestError::MissingColumn {
                column: "building_code or building_name".to_string(),
            });
        }
        let category = find(&["cat_code", "category"]).ok_or_else(|| IngestError::MissingColumn {
            column: "cat_code".to_string(),
        })?;
        let data_type = find(&["type", "data_type"]).ok_or_else(|| IngestError::MissingColumn {
            column: "type".to_string(),
        })?;
        Ok(Self {
            building_code,
            building_name,
            category,
            credit_name: find(&["cat", "credit_name"]),
            points_earned: find(&["awarded_points", "points_earned"]),
            points_available: find(&["potential_points", "points_available"]),
            data_type,
            leed_version: find(&["leed_version"]),
        })
    }
}

/// Cleans a raw export frame into long records.
///
/// When `buildings` is given, a row's `building_code` is looked up there
/// first; direct `building_name` / `leed_version` columns fill in whatever
/// the reference table does not provide.
pub fn clean_leed_data(
    df: &DataFrame,
    buildings: Option<&BuildingIndex>,
    options: &CleanOptions,
) -> Result<CleanedData> {
    let columns = SourceColumns::resolve(&CsvHeaders::new(column_names(df)))?;
    let height = df.height();
    let read = |name: &Option<String>| -> Result<Vec<Option<String>>> {
        match name {
            Some(name) => Ok(string_column_opt(df, name)?),
            None => Ok(vec![None; height]),
        }
    };

    let codes = read(&columns.building_code)?;
    let names = read(&columns.building_name)?;
    let categories = string_column_opt(df, &columns.category)?;
    let credits = read(&columns.credit_name)?;
    let earned = read(&columns.points_earned)?;
    let available = read(&columns.points_available)?;
    let types = string_column_opt(df, &columns.data_type)?;
    let versions = read(&columns.leed_version)?;

    let mut cleaned = CleanedData::default();
    for idx in 0..height {
        let row = idx + 1;
        let code = codes[idx].clone().unwrap_or_default();
        let resolved = buildings.and_then(|index| index.get(&code));

        let building_name = resolved
            .map(|building| building.name.clone())
            .filter(|name| !name.is_empty())
            .or_else(|| names[idx].clone());
        let Some(building_name) = building_name else {
            let reason = if code.is_empty() {
                "no building code or name".to_string()
            } else {
                format!("building code '{code}' not found in reference table")
            };
            reject(&mut cleaned, options.malformed_rows, row, reason)?;
            continue;
        };

        let Some(category) = categories[idx].clone() else {
            reject(
                &mut cleaned,
                options.malformed_rows,
                row,
                "empty category".to_string(),
            )?;
            continue;
        };

        let leed_version = resolved
            .map(|building| building.leed_version.clone())
            .filter(|version| !version.is_empty())
            .or_else(|| versions[idx].as_deref().map(normalize_leed_version))
            .unwrap_or_default();

        cleaned.records.push(LongRecord {
            building_code: code,
            building_name,
            category,
            credit_name: credits[idx].clone().unwrap_or_default(),
            points_earned: parse_points(earned[idx].as_deref(), row),
            points_available: parse_points(available[idx].as_deref(), row),
            leed_version,
            data_type: DataType::from_marker(types[idx].as_deref().unwrap_or_default()),
        });
    }

    debug!(
        records = cleaned.records.len(),
        skipped = cleaned.skipped.len(),
        "source cleaned"
    );
    Ok(cleaned)
}

fn reject(
    cleaned: &mut CleanedData,
    policy: MalformedRowPolicy,
    row: usize,
    reason: String,
) -> Result<()> {
    match policy {
        MalformedRowPolicy::Fail => Err(IngestError::MalformedRow { row, reason }),
        MalformedRowPolicy::Skip => {
            warn!(row, reason = %reason, "skipping malformed row");
            cleaned.skipped.push(SkippedRow { row, reason });
            Ok(())
        }
    }
}

fn parse_points(raw: Option<&str>, row: usize) -> Option<f64> {
    let raw = raw?;
    let parsed = parse_f64(raw);
    if parsed.is_none() {
        debug!(row, value = %raw, "non-numeric points treated as missing");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_export_spellings() {
        let headers = CsvHeaders::new(
            [
                "building_code",
                "cat_code",
                "cat",
                "awarded_points",
                "potential_points",
                "type",
            ]
            .map(String::from)
            .to_vec(),
        );
        let columns = SourceColumns::resolve(&headers).unwrap();
        assert_eq!(columns.category, "cat_code");
        assert_eq!(columns.credit_name.as_deref(), Some("cat"));
        assert_eq!(columns.points_earned.as_deref(), Some("awarded_points"));
        assert!(columns.building_name.is_none());
    }

    #[test]
    fn resolve_requires_a_building_key() {
        let headers = CsvHeaders::new(["cat_code", "type"].map(String::from).to_vec());
        let result = SourceColumns::resolve(&headers);
        assert!(matches!(result, Err(IngestError::MissingColumn { .. })));
    }

    #[test]
    fn resolve_requires_type() {
        let headers = CsvHeaders::new(["building_name", "category"].map(String::from).to_vec());
        match SourceColumns::resolve(&headers) {
            Err(IngestError::MissingColumn { column }) => assert_eq!(column, "type"),
            other => panic!("expected missing type column, got {other:?}"),
        }
    }

    #[test]
    fn parse_points_drops_text() {
        assert_eq!(parse_points(Some("4"), 1), Some(4.0));
        assert_eq!(parse_points(Some("n/a"), 1), None);
        assert_eq!(parse_points(None, 1), None);
    }
}
