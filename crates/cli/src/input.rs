//! Site and configuration file loading.
//!
//! A site file is JSON: the settlement snapshot plus the catalog of building
//! types that may be placed on it. The configuration file is TOML holding
//! any subset of [`PlacementConfig`] fields.

use serde::{Deserialize, Serialize};
use siteplan_core::{BuildingCatalog, BuildingType, PlacementConfig};
use siteplan_placement::SiteSnapshot;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse site file: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse config file: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Placement(#[from] siteplan_core::Error),
}

/// Contents of a site file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteFile {
    #[serde(flatten)]
    pub site: SiteSnapshot,

    #[serde(default)]
    pub building_types: BuildingCatalog,
}

impl SiteFile {
    /// Parses and validates a site file.
    pub fn from_json_str(content: &str) -> Result<Self, CliError> {
        let file: SiteFile = serde_json::from_str(content)?;
        file.site.validate()?;
        Ok(file)
    }

    /// Load a site file from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Looks up a building type by name.
    pub fn building_type(&self, name: &str) -> Result<&BuildingType, CliError> {
        Ok(self.building_types.get(name)?)
    }
}

/// Parses and validates a configuration.
pub fn config_from_toml_str(content: &str) -> Result<PlacementConfig, CliError> {
    let config: PlacementConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load a configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PlacementConfig, CliError> {
    match path {
        Some(path) => config_from_toml_str(&std::fs::read_to_string(path)?),
        None => Ok(PlacementConfig::default()),
    }
}
