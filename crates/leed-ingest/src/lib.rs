//! LEED data ingestion utilities.
//!
//! This crate loads the raw scorecard export and the building reference
//! table, then cleans them into typed long-form records.
//!
//! # Features
//!
//! - **CSV Loading**: Read the export into a Polars DataFrame with all columns as text
//! - **Building Reference**: Resolve building codes to names and LEED versions
//! - **Cleaning**: Normalise versions, parse points, apply the malformed-row policy
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use leed_ingest::{CleanOptions, clean_leed_data, load_buildings, read_csv_table};
//!
//! let data_dir = Path::new("data_repository/original_data");
//! let buildings = load_buildings(&data_dir.join("buildings.csv"))?;
//! let (df, _headers) = read_csv_table(&data_dir.join("original_data.csv"))?;
//! let cleaned = clean_leed_data(&df, Some(&buildings), &CleanOptions::default())?;
//! ```

mod buildings;
mod clean;
mod error;
mod table;
mod version;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{CsvHeaders, read_csv_schema, read_csv_table, validate_encoding};

// === Building Reference ===
pub use buildings::{BuildingIndex, BuildingRef, ResolvedBuilding, load_buildings};

// === Cleaning ===
pub use clean::{
    CleanOptions, CleanedData, MalformedRowPolicy, SkippedRow, SourceColumns, clean_leed_data,
};

// === Versions ===
pub use version::normalize_leed_version;
