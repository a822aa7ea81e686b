//! Error types for wide-table transforms.

use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("missing column: {column}")]
    MissingColumn { column: String },

    #[error("score column `{column}` collides with a key column; rename the category or credit")]
    ReservedColumn { column: String },

    #[error("data frame error: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for TransformError {
    fn from(err: PolarsError) -> Self {
        TransformError::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Fails with [`TransformError::MissingColumn`] unless `df` has `column`.
pub(crate) fn require_column(df: &DataFrame, column: &str) -> Result<()> {
    if df.get_column_names().iter().any(|name| name.as_str() == column) {
        Ok(())
    } else {
        Err(TransformError::MissingColumn {
            column: column.to_string(),
        })
    }
}
