//! Verification-level configuration file.
//!
//! ```toml
//! [verification_levels]
//! "Tucker Hall" = "Gold"
//! "Landrum Hall" = "Silver"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use leed_model::VerificationLookup;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeedConfig {
    /// Building name to certification level.
    #[serde(default)]
    pub verification_levels: VerificationLookup,
}

impl LeedConfig {
    /// The built-in lookup, used when no file is given.
    pub fn builtin() -> Self {
        Self {
            verification_levels: VerificationLookup::builtin(),
        }
    }

    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        debug!(
            path = %path.display(),
            buildings = config.verification_levels.len(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration, refusing to replace an existing file unless `force`.
    pub fn write(&self, path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let text = self.to_toml_string()?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The lookup from `path`, or the built-in one when no path is given.
pub fn resolve_lookup(path: Option<&Path>) -> Result<VerificationLookup, ConfigError> {
    match path {
        Some(path) => Ok(LeedConfig::load(path)?.verification_levels),
        None => Ok(LeedConfig::builtin().verification_levels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leed_model::VerificationLevel;

    #[test]
    fn parses_levels_table() {
        let config = LeedConfig::from_toml_str(
            "[verification_levels]\n\"Tucker Hall\" = \"Gold\"\n\"Landrum Hall\" = \"silver\"\n",
            Path::new("leedwide.toml"),
        )
        .unwrap();
        let levels = &config.verification_levels;
        assert_eq!(levels.len(), 2);
        assert_eq!(levels.get("Tucker Hall"), Some(VerificationLevel::Gold));
        assert_eq!(levels.get("Landrum Hall"), Some(VerificationLevel::Silver));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result = LeedConfig::from_toml_str(
            "[verification_levels]\n\"Tucker Hall\" = \"Bronze\"\n",
            Path::new("leedwide.toml"),
        );
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = LeedConfig::from_toml_str("[levels]\n", Path::new("leedwide.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn builtin_round_trips_through_toml() {
        let builtin = LeedConfig::builtin();
        let text = builtin.to_toml_string().unwrap();
        let parsed = LeedConfig::from_toml_str(&text, Path::new("leedwide.toml")).unwrap();
        assert_eq!(parsed, builtin);
        assert!(!parsed.verification_levels.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = resolve_lookup(Some(Path::new("/nonexistent/leedwide.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/leedwide.toml"));
    }
}
