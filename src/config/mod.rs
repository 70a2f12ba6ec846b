pub mod schema;

pub use schema::ToolsmithConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default toolsmith home directory (~/.toolsmith).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".toolsmith"))
        .unwrap_or_else(|| PathBuf::from(".toolsmith"))
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<ToolsmithConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read toolsmith config file")?;
        let config: ToolsmithConfig =
            toml::from_str(&contents).context("Failed to parse toolsmith config (TOML)")?;
        Ok(config)
    } else {
        Ok(ToolsmithConfig::default())
    }
}

/// Save config to the given path (TOML format).
pub fn save_config(config: &ToolsmithConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents).context("Failed to write config file")?;
    Ok(())
}
