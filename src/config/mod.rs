use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

/// Delay between pressing refresh and the reload, in milliseconds.
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 600;

/// How many inspections the dashboard table shows.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database.
    pub db: Option<String>,
    /// Overrides the refresh delay.
    pub refresh_delay_ms: Option<u64>,
    /// Overrides the recent-inspections row limit.
    pub recent_limit: Option<usize>,
}

impl Config {
    /// Load config from an explicit path, the XDG config dir, or defaults.
    ///
    /// Resolution order:
    /// 1. `ATIS_CONFIG` env var
    /// 2. `$XDG_CONFIG_HOME/atis/config.toml`
    /// 3. `~/.config/atis/config.toml`
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var("ATIS_CONFIG") {
            return Self::load_from(&PathBuf::from(path));
        }

        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }

        Ok(Self::default())
    }

    fn load_from(path: &PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("atis").join("config.toml"));
        }
        if let Some(dirs) = ProjectDirs::from("io", "atis", "atis") {
            paths.push(dirs.config_dir().join("config.toml"));
        }
        paths
    }

    pub fn refresh_delay_ms(&self) -> u64 {
        self.refresh_delay_ms.unwrap_or(DEFAULT_REFRESH_DELAY_MS)
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}

/// Directory where the database and exports live.
pub fn data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("io", "atis", "atis")
        .context("could not determine a data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Default database location when neither the CLI nor the config names one.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("atis.sqlite3"))
}
