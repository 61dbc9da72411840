use crate::errors::{GridSightError, GridSightResult};
use crate::pathfinding::{SearchConfig, TraversalConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod range_types;

/// Everything the tools read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSightConfig {
    pub traversal: TraversalConfig,
    pub search: SearchConfig,
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("gridsight");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

/// Load the user's configuration, falling back to defaults when it is missing or unreadable
pub fn load_config() -> GridSightConfig {
    if let Some(config_path) = get_config_path() {
        if let Ok(config) = load_config_from(&config_path) {
            return config;
        }
    }
    GridSightConfig::default()
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> GridSightResult<GridSightConfig> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

pub fn save_config(config: &GridSightConfig) -> GridSightResult<()> {
    let config_path = get_config_path().ok_or(GridSightError::ConfigDirNotFound)?;
    save_config_to(config, config_path)
}

pub fn save_config_to<P: AsRef<Path>>(config: &GridSightConfig, path: P) -> GridSightResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
