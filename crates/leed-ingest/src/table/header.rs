//! CSV header parsing and normalization.

/// Column names from the first row of a CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Normalized column names (trimmed, BOM removed), in file order.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Finds the stored column name matching `name` case-insensitively.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| column.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Finds the first of several accepted spellings present in the header.
    pub fn find_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.find(name))
    }
}

/// Normalizes a header value: trims whitespace and a stray UTF-8 BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}
