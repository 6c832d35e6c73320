//! Configuration loading and database path resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable naming the database file.
pub const DB_ENV_VAR: &str = "MARQUEE_DATABASE";

/// Database path resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `MARQUEE_DATABASE` environment variable
/// 3. `database` key in the TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DB_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = config_file_path() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(database) = config.get("database").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(database));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_database_path())
}

/// Locate the platform config file (`marquee/config.toml` under the
/// user config directory, with `/etc/marquee/config.toml` as a Linux
/// system-wide fallback).
fn config_file_path() -> Result<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("marquee").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/marquee/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }
    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("marquee"))
        .unwrap_or_else(|| PathBuf::from("./marquee_data"))
        .join("marquee.db")
}
