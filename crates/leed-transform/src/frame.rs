//! Wide frame wrapper carrying the output variant.

use polars::prelude::DataFrame;

use leed_model::OutputVariant;

/// One output table: a wide DataFrame tagged with the variant it renders.
#[derive(Debug, Clone)]
pub struct WideFrame {
    pub variant: OutputVariant,
    pub data: DataFrame,
}

impl WideFrame {
    pub fn new(variant: OutputVariant, data: DataFrame) -> Self {
        Self { variant, data }
    }

    /// Number of buildings (rows).
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_count(&self) -> usize {
        self.data.width()
    }

    /// Output file name for this frame's variant.
    pub fn file_name(&self) -> String {
        self.variant.file_name()
    }
}

#[cfg(test)]
mod tests {
    use leed_model::LongRecord;

    use super::*;
    use crate::pivot::{PivotOptions, to_wide};

    #[test]
    fn counts_and_file_name_follow_the_frame() {
        let records = vec![
            LongRecord::category("Tucker Hall", "EA", 12.0, 33.0, "4.0"),
            LongRecord::category("Tucker Hall", "WE", 6.0, 10.0, "4.0"),
        ];
        let data = to_wide(&records, &PivotOptions::categories()).unwrap().data;
        let frame = WideFrame::new(OutputVariant::CategoriesOnly, data);
        assert_eq!(frame.record_count(), 1);
        assert_eq!(frame.column_count(), 4);
        assert_eq!(frame.file_name(), "cleaned_wide_data_cats.csv");
    }
}
