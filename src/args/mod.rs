//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::ProbeArgs;
pub use defaults::{DEFAULT_API_URL, DEFAULT_DEPLOY_ENV, DEFAULT_USER_AGENT};
pub(crate) use defaults::DEFAULT_SAMCONFIG_FILES;
pub use parsers::parse_duration_value;
pub use types::OutputFormat;
