//! Configuration management.
//!
//! Configuration lives in `~/.sqlcoach/config.json`. Missing files and
//! missing fields fall back to defaults, so a fresh install works without
//! any configuration step.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default URL for the sample database download.
pub const DEFAULT_DATABASE_URL: &str = "https://data.sqlcoach.dev/sample.db";

/// Default GitHub-style repository for the companion tools release.
pub const DEFAULT_RELEASE_REPO: &str = "sqlcoach/sqlcoach-tools";

/// Default package name for the browser install step.
pub const DEFAULT_BROWSER_PACKAGE: &str = "firefox";

/// Default SQL reference opened by the docs command.
pub const DEFAULT_DOCS_URL: &str = "https://www.sqlite.org/lang.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the sample database is downloaded from.
    pub database_url: String,

    /// Override for the sample database location. Defaults to
    /// `~/.sqlcoach/sample.db` when unset.
    pub database_path: Option<PathBuf>,

    /// Package name passed to the system package manager during setup.
    pub browser_package: String,

    /// GitHub-style `owner/name` repository queried for the companion
    /// tools release during setup.
    pub release_repo: String,

    /// Directory the companion tools archive is unpacked into.
    pub bin_dir: Option<PathBuf>,

    /// SQL reference page opened by the docs command.
    pub docs_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_path: None,
            browser_package: DEFAULT_BROWSER_PACKAGE.to_string(),
            release_repo: DEFAULT_RELEASE_REPO.to_string(),
            bin_dir: None,
            docs_url: DEFAULT_DOCS_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Saves the config atomically (write temp, rename).
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content).context("Failed to write config temp file")?;
        fs::rename(&temp_path, &path).context("Failed to rename config file")?;
        Ok(())
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(app_home()?.join("config.json"))
    }

    /// Resolves the sample database path (explicit override or app home).
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_home()?.join("sample.db")),
        }
    }

    /// Resolves the bin directory the tools archive is unpacked into.
    pub fn bin_dir(&self) -> Result<PathBuf> {
        match &self.bin_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(dirs::home_dir()
                .context("Could not find home directory")?
                .join(".local")
                .join("bin")),
        }
    }

    /// Sets a config value by key name. Returns an error for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "database_url" => self.database_url = value.to_string(),
            "database_path" => self.database_path = Some(PathBuf::from(value)),
            "browser_package" => self.browser_package = value.to_string(),
            "release_repo" => self.release_repo = value.to_string(),
            "bin_dir" => self.bin_dir = Some(PathBuf::from(value)),
            "docs_url" => self.docs_url = value.to_string(),
            _ => anyhow::bail!(
                "Unknown config key '{key}'. Valid keys: database_url, database_path, \
                 browser_package, release_repo, bin_dir, docs_url"
            ),
        }
        Ok(())
    }
}

/// Returns the app home directory (`~/.sqlcoach`), creating it if needed.
pub fn app_home() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Could not find home directory")?
        .join(".sqlcoach");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
