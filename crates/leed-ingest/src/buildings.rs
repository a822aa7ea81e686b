//! Building reference table (`buildings.csv`).
//!
//! The scorecard export identifies buildings by code; this table supplies
//! the display name and the rating-system version for each code.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::version::normalize_leed_version;

/// One row of `buildings.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildingRef {
    pub building_code: String,
    #[serde(alias = "building_name")]
    pub building: String,
    #[serde(alias = "leed_version", default)]
    pub leed_code: String,
}

/// A resolved building: display name plus normalised version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBuilding {
    pub name: String,
    pub leed_version: String,
}

/// Building code → name and version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingIndex {
    by_code: BTreeMap<String, ResolvedBuilding>,
}

impl BuildingIndex {
    /// Builds the index; a repeated code keeps its last row.
    pub fn from_refs(refs: impl IntoIterator<Item = BuildingRef>) -> Self {
        let mut by_code = BTreeMap::new();
        for row in refs {
            let code = row.building_code.trim().to_string();
            if code.is_empty() {
                continue;
            }
            let resolved = ResolvedBuilding {
                name: row.building.trim().to_string(),
                leed_version: normalize_leed_version(&row.leed_code),
            };
            if let Some(previous) = by_code.insert(code.clone(), resolved) {
                warn!(
                    building_code = %code,
                    previous = %previous.name,
                    "duplicate building code in reference table, keeping last"
                );
            }
        }
        Self { by_code }
    }

    pub fn get(&self, building_code: &str) -> Option<&ResolvedBuilding> {
        self.by_code.get(building_code.trim())
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Loads `buildings.csv` into a [`BuildingIndex`].
pub fn load_buildings(path: &Path) -> Result<BuildingIndex> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<BuildingRef>() {
        let row = result.map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        rows.push(row);
    }

    let index = BuildingIndex::from_refs(rows);
    debug!(path = %path.display(), buildings = index.len(), "building reference loaded");
    Ok(index)
}
