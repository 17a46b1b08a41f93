use std::collections::HashSet;

use serde_json::json;

use crate::error::ScenarioError;

use super::types::Scenario;

/// Case names of the built-in table, in table order.
pub const BUILTIN_SESSION_IDS: [&str; 7] = [
    "get_session_success",
    "get_session_not_found",
    "post_session_new",
    "post_session_without_msg",
    "post_session_existing",
    "post_invalid_method",
    "post_missing_parameters",
];

/// Ordered scenarios with pairwise distinct `session_id`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioTable {
    scenarios: Vec<Scenario>,
}

impl ScenarioTable {
    /// # Errors
    ///
    /// Returns an error when the list is empty, a `session_id` is empty, or
    /// two scenarios share a `session_id`.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, ScenarioError> {
        if scenarios.is_empty() {
            return Err(ScenarioError::EmptyTable);
        }
        let mut seen = HashSet::with_capacity(scenarios.len());
        for (index, scenario) in scenarios.iter().enumerate() {
            if scenario.session_id.trim().is_empty() {
                return Err(ScenarioError::EmptySessionId { index });
            }
            if !seen.insert(scenario.session_id.as_str()) {
                return Err(ScenarioError::DuplicateSessionId {
                    session_id: scenario.session_id.clone(),
                });
            }
        }
        Ok(Self { scenarios })
    }

    /// The dialogue session cases run against a deployment.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            scenarios: builtin_scenarios(),
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    #[must_use]
    pub fn get(&self, session_id: &str) -> Option<&Scenario> {
        self.scenarios
            .iter()
            .find(|scenario| scenario.session_id == session_id)
    }

    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.scenarios
            .iter()
            .map(|scenario| scenario.session_id.as_str())
    }

    /// Narrows the table to the named cases, keeping table order. An empty
    /// selection keeps every case.
    ///
    /// # Errors
    ///
    /// Returns an error when a name does not match any case.
    pub fn select(&self, names: &[String]) -> Result<Self, ScenarioError> {
        if names.is_empty() {
            return Ok(self.clone());
        }
        if let Some(unknown) = names.iter().find(|name| self.get(name).is_none()) {
            return Err(ScenarioError::UnknownCase {
                name: unknown.clone(),
            });
        }
        let scenarios = self
            .scenarios
            .iter()
            .filter(|scenario| names.contains(&scenario.session_id))
            .cloned()
            .collect();
        Ok(Self { scenarios })
    }
}

impl<'table> IntoIterator for &'table ScenarioTable {
    type Item = &'table Scenario;
    type IntoIter = std::slice::Iter<'table, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn party() -> serde_json::Value {
    json!([
        {"name": "Seth", "role": "Wizard"},
        {"name": "Hank", "role": "Warrior"}
    ])
}

// Error-named cases still expect 200; `expected_body` records what the
// service documents, not what is asserted.
fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("get_session_success", "GET", "test-session-id")
            .with_expected_body(json!({"users": party(), "dialogue": []}).to_string()),
        Scenario::new("get_session_not_found", "GET", "non-existent-session")
            .with_expected_body(json!({"error": "Session not found"}).to_string()),
        Scenario::new("post_session_new", "POST", "new-session-id")
            .with_body(&json!({
                "users": party(),
                "user": "Seth",
                "msg": "I cast a fireball at the orc."
            }))
            .with_expected_body("\"The orc is engulfed in flames.\""),
        Scenario::new("post_session_without_msg", "POST", "new-session-id")
            .with_body(&json!({"users": party()}))
            .with_expected_body("\"Something about each user\""),
        Scenario::new("post_session_existing", "POST", "existing-session-id")
            .with_body(&json!({
                "user": "Hank",
                "msg": "I charge at the orc with my sword."
            }))
            .with_expected_body("\"You slash the orc, and it falls defeated.\""),
        Scenario::new("post_invalid_method", "PUT", "test-session-id")
            .with_expected_body(json!({"error": "Method not allowed"}).to_string()),
        Scenario::new("post_missing_parameters", "POST", "test-session-id")
            .with_body(&json!({"msg": "I look around."}))
            .with_expected_body(json!({"error": "KeyError: 'user'"}).to_string()),
    ]
}
