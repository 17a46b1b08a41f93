//! Runner configuration and deployment config loading.
mod loader;
pub mod types;


pub use loader::{load_samconfig, load_samconfig_file};
pub use types::{CommandSection, EnvironmentProfile, RunnerConfig, SamConfig};
