//! Wide table CSV writer.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use leed_transform::WideFrame;

use crate::error::{OutputError, Result};

/// Writes a frame as comma-delimited CSV with a header row.
///
/// Null cells are written as empty fields.
pub fn write_csv(path: &Path, df: &DataFrame) -> Result<()> {
    let mut file = File::create(path).map_err(|e| OutputError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut data = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut data)
        .map_err(|e| OutputError::CsvWrite {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Writes a wide frame to `dir` under its variant's file name.
pub fn write_variant(dir: &Path, frame: &WideFrame) -> Result<PathBuf> {
    let path = dir.join(frame.file_name());
    write_csv(&path, &frame.data)?;
    info!(
        variant = %frame.variant,
        rows = frame.record_count(),
        columns = frame.column_count(),
        path = %path.display(),
        "wrote wide table"
    );
    Ok(path)
}
