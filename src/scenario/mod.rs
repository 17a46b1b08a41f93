//! Scenario data model, the built-in table, and scenario file loading.
mod loader;
mod table;
mod types;


pub use loader::load_scenarios_file;
pub use table::{BUILTIN_SESSION_IDS, ScenarioTable};
pub use types::{PathParameters, Scenario, ScenarioMethod, ScenarioPayload};
