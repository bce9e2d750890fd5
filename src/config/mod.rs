use crate::core::{Theme, LINKS_KEY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://jsonlink.io/api/extract";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata extraction endpoint; the link goes in its `url` parameter.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Where the library is stored. Falls back to `$XDG_DATA_HOME/linkshelf`.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub theme: Option<Theme>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            user_agent: format!("linkshelf/{}", env!("CARGO_PKG_VERSION")),
            timeout: 10,
            data_dir: None,
            storage_key: LINKS_KEY.to_string(),
            theme: None,
        }
    }
}

impl Config {
    /// Loads `$XDG_CONFIG_HOME/linkshelf/config.toml`, or defaults when absent.
    pub fn load() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("linkshelf")?;
        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config: Config =
            toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::new()?;
        Ok(xdg_dirs.get_data_home().join("linkshelf"))
    }
}
