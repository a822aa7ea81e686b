//! Long-form score records.
//!
//! One [`LongRecord`] is one observation: a building scored on one category
//! or credit. The pivot turns many of these into a single wide row per
//! building.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of observation carried by a long record.
///
/// The source export marks category subtotals with `cat`; everything the
/// categories-only variant drops is some other kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Category subtotal (e.g. all Energy and Atmosphere points).
    Category,
    /// Individual credit within a category.
    Credit,
    /// Prerequisite, worth no points.
    Prerequisite,
    /// Unrecognised marker, kept verbatim.
    Other(String),
}

impl DataType {
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Category => "cat",
            DataType::Credit => "credit",
            DataType::Prerequisite => "prereq",
            DataType::Other(value) => value.as_str(),
        }
    }

    /// Parse a record marker (case-insensitive). Unknown markers become `Other`.
    pub fn from_marker(marker: &str) -> Self {
        let trimmed = marker.trim();
        match trimmed.to_lowercase().as_str() {
            "cat" | "category" => DataType::Category,
            "credit" | "cred" => DataType::Credit,
            "prereq" | "prerequisite" => DataType::Prerequisite,
            _ => DataType::Other(trimmed.to_string()),
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, DataType::Category)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DataType::from_marker(s))
    }
}

/// A single building × category/credit observation after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    /// Key into the building reference table; empty when the source had none.
    pub building_code: String,
    pub building_name: String,
    /// Category code (e.g. `EA`).
    pub category: String,
    /// Category or credit label (e.g. `Energy and Atmosphere`).
    pub credit_name: String,
    pub points_earned: Option<f64>,
    pub points_available: Option<f64>,
    /// Normalised rating-system version (e.g. `4.0`).
    pub leed_version: String,
    pub data_type: DataType,
}

impl LongRecord {
    /// Minimal category record, mostly useful in tests and fixtures.
    pub fn category(
        building_name: impl Into<String>,
        category: impl Into<String>,
        points_earned: f64,
        points_available: f64,
        leed_version: impl Into<String>,
    ) -> Self {
        Self {
            building_code: String::new(),
            building_name: building_name.into(),
            category: category.into(),
            credit_name: String::new(),
            points_earned: Some(points_earned),
            points_available: Some(points_available),
            leed_version: leed_version.into(),
            data_type: DataType::Category,
        }
    }

    /// True when both earned and available points are zero.
    pub fn is_zero_of_zero(&self) -> bool {
        matches!(
            (self.points_earned, self.points_available),
            (Some(earned), Some(available)) if earned == 0.0 && available == 0.0
        )
    }
}
