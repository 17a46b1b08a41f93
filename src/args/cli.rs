use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_API_URL, DEFAULT_DEPLOY_ENV};
use super::parsers::parse_duration_arg;
use super::types::OutputFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "End-to-end scenario runner for a deployed dialogue session API. Sends one request per scenario and expects HTTP 200."
)]
pub struct ProbeArgs {
    /// Base URL of the deployed endpoint
    #[arg(long = "api-url", env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Deployment profile name
    #[arg(long = "deploy-env", env = "DEPLOY_ENV", default_value = DEFAULT_DEPLOY_ENV)]
    pub deploy_env: String,

    /// Path to the SAM deployment config (defaults to ./samconfig.yaml if present)
    #[arg(long = "samconfig")]
    pub samconfig: Option<String>,

    /// Load the scenario table from a .yaml/.yml/.json/.toml file instead of the built-in one
    #[arg(long = "scenarios")]
    pub scenarios: Option<String>,

    /// Only run the named case (repeatable)
    #[arg(long = "case", value_name = "SESSION_ID")]
    pub cases: Vec<String>,

    /// List case names and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Per-request timeout (supports ms/s/m/h); no timeout when unset
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Summary format
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Write the summary to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
