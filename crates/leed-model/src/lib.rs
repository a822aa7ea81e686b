//! Data model for the LEED wide transpiler.
//!
//! - **record**: long-form score records and their data types
//! - **verification**: certification tiers and the building lookup
//! - **variant**: the output tables produced by a run

pub mod error;
pub mod record;
pub mod variant;
pub mod verification;

pub use error::{ModelError, Result};
pub use record::{DataType, LongRecord};
pub use variant::OutputVariant;
pub use verification::{VerificationLevel, VerificationLookup};

/// Building name column in every wide table.
pub const BUILDING_NAME_COLUMN: &str = "building_name";
/// LEED version column in every wide table.
pub const LEED_VERSION_COLUMN: &str = "leed_version";
/// Column added by the verification-level merge.
pub const VERIFICATION_LEVEL_COLUMN: &str = "verification_level";
