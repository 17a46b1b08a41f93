use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario {index} has an empty session_id.")]
    EmptySessionId { index: usize },
    #[error("Duplicate session_id '{session_id}' in scenario table.")]
    DuplicateSessionId { session_id: String },
    #[error("Unknown case '{name}'. Use --list to see available cases.")]
    UnknownCase { name: String },
    #[error("Scenario table is empty.")]
    EmptyTable,
    #[error("Invalid JSON body for session {session_id}: {source}")]
    InvalidBody {
        session_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid HTTP method '{method}' for session {session_id}: {source}")]
    InvalidMethod {
        session_id: String,
        method: String,
        #[source]
        source: http::method::InvalidMethod,
    },
    #[error("Failed to read scenarios '{path}': {source}")]
    ReadScenarios {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML scenarios '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse TOML scenarios '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON scenarios '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported scenarios extension '{ext}'. Use .yaml, .yml, .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Scenarios file must have a .yaml, .yml, .toml or .json extension.")]
    MissingExtension,
}
