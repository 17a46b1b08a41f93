use std::path::Path;

use serde::Deserialize;

use crate::error::ScenarioError;

use super::table::ScenarioTable;
use super::types::Scenario;

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    scenarios: Vec<Scenario>,
}

/// Loads a scenario table from a file with a top-level `scenarios` list.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, or when the
/// resulting table is empty or has duplicate `session_id`s.
pub fn load_scenarios_file(path: &Path) -> Result<ScenarioTable, ScenarioError> {
    let content =
        std::fs::read_to_string(path).map_err(|err| ScenarioError::ReadScenarios {
            path: path.to_path_buf(),
            source: err,
        })?;
    let file: ScenarioFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|err| ScenarioError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })?
        }
        Some("toml") => toml::from_str(&content).map_err(|err| ScenarioError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        })?,
        Some("json") => {
            serde_json::from_str(&content).map_err(|err| ScenarioError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })?
        }
        Some(ext) => {
            return Err(ScenarioError::UnsupportedExtension {
                ext: ext.to_owned(),
            });
        }
        None => return Err(ScenarioError::MissingExtension),
    };
    ScenarioTable::new(file.scenarios)
}
