use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use textra_config::Config;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "textra")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

pub fn default_preferences_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("preferences.json"))
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    tracing::debug!("Loading config from {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    Config::from_json_str(&data).with_context(|| format!("Invalid config {}", path.display()))
}

/// An explicit path must exist. Otherwise the user config is used when present,
/// falling back to defaults plus environment.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => read_config(&path),
        _ => Ok(Config::new()),
    }
}

/// CLI flag, then config, then the platform config dir
pub fn preferences_path(flag: Option<PathBuf>, config: &Config) -> anyhow::Result<PathBuf> {
    flag.or_else(|| config.preferences_path.as_ref().map(PathBuf::from))
        .or_else(default_preferences_path)
        .context("No config directory available, pass --preferences")
}
