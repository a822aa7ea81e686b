//! Wide-to-long melt, the inverse of [`pivot_cells`](crate::pivot_cells).

use polars::prelude::DataFrame;

use leed_common::{raw_string_column, string_column_opt};
use leed_model::{BUILDING_NAME_COLUMN, LEED_VERSION_COLUMN, VERIFICATION_LEVEL_COLUMN};

use crate::error::{Result, require_column};
use crate::pivot::WideCell;

/// Turns a wide frame back into one cell per building and score column.
///
/// Null score cells are kept as `value: None` so that buildings and columns
/// with no values survive a second pivot. `verification_level` is not a
/// score column and is left out.
pub fn melt_wide(df: &DataFrame) -> Result<Vec<WideCell>> {
    require_column(df, BUILDING_NAME_COLUMN)?;
    require_column(df, LEED_VERSION_COLUMN)?;

    let names = raw_string_column(df, BUILDING_NAME_COLUMN)?;
    let versions = raw_string_column(df, LEED_VERSION_COLUMN)?;

    let mut score_columns = Vec::new();
    for name in df.get_column_names() {
        let name = name.as_str();
        if [
            BUILDING_NAME_COLUMN,
            LEED_VERSION_COLUMN,
            VERIFICATION_LEVEL_COLUMN,
        ]
        .contains(&name)
        {
            continue;
        }
        score_columns.push((name.to_string(), string_column_opt(df, name)?));
    }

    let mut cells = Vec::with_capacity(names.len() * score_columns.len());
    for (idx, building) in names.iter().enumerate() {
        for (column, values) in &score_columns {
            cells.push(WideCell {
                building_name: building.clone(),
                leed_version: versions[idx].clone(),
                column: column.clone(),
                value: values[idx].clone(),
            });
        }
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use leed_model::LongRecord;

    use super::*;
    use crate::pivot::{PivotOptions, pivot_cells, to_wide};

    #[test]
    fn melt_keeps_null_cells() {
        let records = vec![
            LongRecord::category("BuildingA", "Energy", 5.0, 10.0, "4.0"),
            LongRecord::category("BuildingA", "Water", 3.0, 5.0, "4.0"),
            LongRecord::category("BuildingB", "Energy", 8.0, 10.0, "3.0"),
        ];
        let wide = to_wide(&records, &PivotOptions::categories()).unwrap().data;
        let cells = melt_wide(&wide).unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[2].building_name, "BuildingB");
        assert_eq!(cells[2].leed_version, "3.0");
        assert_eq!(cells[2].value.as_deref(), Some("8"));
        assert_eq!(cells[3].column, "Water");
        assert_eq!(cells[3].value, None);

        let rebuilt = pivot_cells(&cells).unwrap();
        assert!(rebuilt.equals_missing(&wide));
    }

    #[test]
    fn all_null_building_and_column_survive_round_trip() {
        let records = vec![
            LongRecord::category("BuildingA", "Energy", 5.0, 10.0, "4.0"),
            LongRecord {
                points_earned: None,
                ..LongRecord::category("BuildingB", "Water", 0.0, 5.0, "4.0")
            },
        ];
        let wide = to_wide(&records, &PivotOptions::categories()).unwrap().data;
        assert_eq!(wide.shape(), (2, 4));

        let rebuilt = pivot_cells(&melt_wide(&wide).unwrap()).unwrap();
        assert_eq!(rebuilt.shape(), (2, 4));
        assert!(rebuilt.equals_missing(&wide));
    }

    #[test]
    fn melt_keeps_name_whitespace() {
        let records = vec![LongRecord::category(" Tucker Hall", "EA", 12.0, 33.0, "4.0")];
        let wide = to_wide(&records, &PivotOptions::categories()).unwrap().data;
        let cells = melt_wide(&wide).unwrap();
        assert_eq!(cells[0].building_name, " Tucker Hall");
    }

    #[test]
    fn melt_requires_building_column() {
        let df = DataFrame::empty();
        assert!(melt_wide(&df).is_err());
    }
}
