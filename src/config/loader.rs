use std::path::{Path, PathBuf};

use crate::args::DEFAULT_SAMCONFIG_FILES;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::SamConfig;

/// Loads the deployment config from the provided path or default locations.
///
/// # Errors
///
/// Returns an error when an explicit path cannot be read or parsed, or when a
/// default file exists but fails to parse.
pub fn load_samconfig(path: Option<&str>) -> AppResult<Option<SamConfig>> {
    if let Some(path) = path {
        let path = PathBuf::from(path);
        return Ok(Some(load_samconfig_file(&path)?));
    }

    for candidate in DEFAULT_SAMCONFIG_FILES {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            return Ok(Some(load_samconfig_file(&candidate)?));
        }
    }

    Ok(None)
}

/// Loads a deployment config file, picking the format by extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unsupported
/// extension, or fails to parse.
pub fn load_samconfig_file(path: &Path) -> AppResult<SamConfig> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
