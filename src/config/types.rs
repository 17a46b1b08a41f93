use std::collections::BTreeMap;

use serde::Deserialize;

use crate::args::{DEFAULT_API_URL, DEFAULT_DEPLOY_ENV};

/// Immutable settings shared by every case of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub base_url: String,
    pub deploy_env: String,
}

impl RunnerConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, deploy_env: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            deploy_env: deploy_env.into(),
        }
    }

    /// Reads `API_URL` and `DEPLOY_ENV`, falling back to the placeholder
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`RunnerConfig::from_env`], resolving variables through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let deploy_env = lookup("DEPLOY_ENV").unwrap_or_else(|| DEFAULT_DEPLOY_ENV.to_owned());
        Self::new(base_url, deploy_env)
    }

    /// `{base_url}/{id}`, joined verbatim.
    #[must_use]
    pub fn target_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    #[must_use]
    pub fn uses_placeholder_url(&self) -> bool {
        self.base_url == DEFAULT_API_URL
    }
}

/// SAM CLI deployment config: a `version` key plus one table per
/// environment, each holding per-command `parameters`.
#[derive(Debug, Default, Deserialize)]
pub struct SamConfig {
    pub version: Option<f64>,
    #[serde(flatten)]
    pub environments: BTreeMap<String, EnvironmentProfile>,
}

pub type EnvironmentProfile = BTreeMap<String, CommandSection>;

#[derive(Debug, Default, Deserialize)]
pub struct CommandSection {
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl SamConfig {
    #[must_use]
    pub fn profile(&self, deploy_env: &str) -> Option<&EnvironmentProfile> {
        self.environments.get(deploy_env)
    }

    /// Stack name declared for `deploy`, falling back to `global`.
    #[must_use]
    pub fn stack_name(&self, deploy_env: &str) -> Option<&str> {
        let profile = self.profile(deploy_env)?;
        ["deploy", "global"].iter().find_map(|command| {
            profile
                .get(*command)
                .and_then(|section| section.parameters.get("stack_name"))
                .and_then(serde_json::Value::as_str)
        })
    }
}
