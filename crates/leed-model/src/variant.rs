use std::fmt;

use serde::{Deserialize, Serialize};

/// One output table produced by a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutputVariant {
    /// Category subtotals only.
    CategoriesOnly,
    /// Every record kind, one column per category and credit.
    Full,
    /// Category subtotals restricted to one LEED version.
    Version(String),
}

impl OutputVariant {
    /// File name written for this variant inside the output directory.
    ///
    /// Characters of a version outside `[0-9A-Za-z._-]` become `_`, so the
    /// name never leaves the output directory.
    pub fn file_name(&self) -> String {
        match self {
            OutputVariant::CategoriesOnly => "cleaned_wide_data_cats.csv".to_string(),
            OutputVariant::Full => "cleaned_wide_data_full.csv".to_string(),
            OutputVariant::Version(version) => {
                format!("cleaned_wide_data_cats_v{}.csv", file_safe(version))
            }
        }
    }

    /// Short label for logs and the summary table.
    pub fn label(&self) -> String {
        match self {
            OutputVariant::CategoriesOnly => "categories".to_string(),
            OutputVariant::Full => "full".to_string(),
            OutputVariant::Version(version) => format!("v{version}"),
        }
    }

    pub fn categories_only(&self) -> bool {
        !matches!(self, OutputVariant::Full)
    }
}

fn file_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl fmt::Display for OutputVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
