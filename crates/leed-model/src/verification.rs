//! Certification tiers and the hand-maintained building lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Certification tier awarded to a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VerificationLevel {
    Certified,
    Silver,
    Gold,
    Platinum,
}

impl VerificationLevel {
    pub const ALL: [VerificationLevel; 4] = [
        VerificationLevel::Certified,
        VerificationLevel::Silver,
        VerificationLevel::Gold,
        VerificationLevel::Platinum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationLevel::Certified => "Certified",
            VerificationLevel::Silver => "Silver",
            VerificationLevel::Gold => "Gold",
            VerificationLevel::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        VerificationLevel::ALL
            .into_iter()
            .find(|level| level.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ModelError::InvalidVerificationLevel {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for VerificationLevel {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VerificationLevel> for String {
    fn from(level: VerificationLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Mapping from exact building name to certification tier.
///
/// Keys are matched byte-for-byte: case and whitespace matter, so a key only
/// takes effect when it equals a `building_name` in the source data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationLookup {
    levels: BTreeMap<String, VerificationLevel>,
}

/// Campus building levels, maintained by hand. Names must match the export exactly.
const BUILTIN_LEVELS: &[(&str, VerificationLevel)] = &[
    ("Lemon and Hardy Halls", VerificationLevel::Certified),
    ("Rec Center Renovations", VerificationLevel::Certified),
    ("Cohen Career Center", VerificationLevel::Gold),
    ("Miller Hall (Mason School of Business", VerificationLevel::Gold),
    ("School of Education", VerificationLevel::Gold),
    ("Tucker Hall", VerificationLevel::Gold),
    ("Chancellors Hall", VerificationLevel::Gold),
    ("ISC 3", VerificationLevel::Gold),
    ("Landrum Hall", VerificationLevel::Silver),
    ("Marshall Wythe School of Law Addition", VerificationLevel::Silver),
    ("McLeod Tyler Wellness Center", VerificationLevel::Gold),
    ("Music Arts Center", VerificationLevel::Silver),
    ("PBK Memorial Hall", VerificationLevel::Silver),
    ("West Utility Plant", VerificationLevel::Gold),
    ("Greek Fraternity Community Building", VerificationLevel::Silver),
    ("House 620", VerificationLevel::Gold),
    ("House 630", VerificationLevel::Gold),
    ("House 640", VerificationLevel::Gold),
    (
        "Houses 660, 670, 710, 720, 730, 740, 750, 760",
        VerificationLevel::Gold,
    ),
    ("Alumni House Addition", VerificationLevel::Silver),
    ("Campus Living Center", VerificationLevel::Silver),
    ("Sadler West Expansion", VerificationLevel::Silver),
];

impl VerificationLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in campus table used when no configuration file is given.
    pub fn builtin() -> Self {
        BUILTIN_LEVELS
            .iter()
            .map(|(name, level)| ((*name).to_string(), *level))
            .collect()
    }

    /// Insert or replace a building's level, returning the previous one.
    pub fn insert(
        &mut self,
        building_name: impl Into<String>,
        level: VerificationLevel,
    ) -> Option<VerificationLevel> {
        self.levels.insert(building_name.into(), level)
    }

    pub fn get(&self, building_name: &str) -> Option<VerificationLevel> {
        self.levels.get(building_name).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Entries in building-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, VerificationLevel)> {
        self.levels.iter().map(|(name, level)| (name.as_str(), *level))
    }
}

impl FromIterator<(String, VerificationLevel)> for VerificationLookup {
    fn from_iter<I: IntoIterator<Item = (String, VerificationLevel)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}
