//! Output directory handling.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{OutputError, Result};

/// Empties the output directory by deleting and recreating it.
///
/// A directory that does not exist yet is simply created.
pub fn clear_output_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => debug!(path = %dir.display(), "removed previous output"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(OutputError::DirectoryClear {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    }
    ensure_output_dir(dir)
}

/// Creates the output directory and any missing parents.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| OutputError::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })
}
