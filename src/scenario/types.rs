use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScenarioError;

/// One named case: a request description plus the response body the
/// service is documented to return.
///
/// `expected_body` is descriptive only; the runner asserts on status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Scenario {
    pub session_id: String,
    pub payload: ScenarioPayload,
    #[serde(default)]
    pub expected_body: String,
}

/// Request description in Lambda proxy event shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPayload {
    pub http_method: ScenarioMethod,
    pub path_parameters: PathParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathParameters {
    pub id: String,
}

/// `GET` and `POST` are dispatched specially; any other token is sent as a
/// bodiless request with that method.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ScenarioMethod {
    Get,
    Post,
    Other(String),
}

impl ScenarioMethod {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ScenarioMethod::Get => "GET",
            ScenarioMethod::Post => "POST",
            ScenarioMethod::Other(token) => token,
        }
    }
}

impl From<String> for ScenarioMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "GET" => ScenarioMethod::Get,
            "POST" => ScenarioMethod::Post,
            _ => ScenarioMethod::Other(value),
        }
    }
}

impl From<&str> for ScenarioMethod {
    fn from(value: &str) -> Self {
        ScenarioMethod::from(value.to_owned())
    }
}

impl From<ScenarioMethod> for String {
    fn from(value: ScenarioMethod) -> Self {
        match value {
            ScenarioMethod::Other(token) => token,
            ScenarioMethod::Get | ScenarioMethod::Post => value.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for ScenarioMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Scenario {
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        method: impl Into<ScenarioMethod>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            payload: ScenarioPayload {
                http_method: method.into(),
                path_parameters: PathParameters { id: id.into() },
                body: None,
            },
            expected_body: String::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: &Value) -> Self {
        self.payload.body = Some(body.to_string());
        self
    }

    #[must_use]
    pub fn with_expected_body(mut self, expected_body: impl Into<String>) -> Self {
        self.expected_body = expected_body.into();
        self
    }

    #[must_use]
    pub fn path_id(&self) -> &str {
        &self.payload.path_parameters.id
    }

    #[must_use]
    pub const fn method(&self) -> &ScenarioMethod {
        &self.payload.http_method
    }

    /// Resolves the wire method. Tokens are upper-cased before parsing.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is not a valid HTTP method.
    pub fn request_method(&self) -> Result<Method, ScenarioError> {
        match self.method() {
            ScenarioMethod::Get => Ok(Method::GET),
            ScenarioMethod::Post => Ok(Method::POST),
            ScenarioMethod::Other(token) => Method::from_bytes(token.to_ascii_uppercase().as_bytes())
                .map_err(|err| ScenarioError::InvalidMethod {
                    session_id: self.session_id.clone(),
                    method: token.clone(),
                    source: err,
                }),
        }
    }

    /// JSON payload to send. Only `POST` carries one; a missing body is `{}`
    /// and a JSON `null` body sends nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when a `POST` body is not valid JSON.
    pub fn json_body(&self) -> Result<Option<Value>, ScenarioError> {
        match self.method() {
            ScenarioMethod::Post => {
                let raw = self.payload.body.as_deref().unwrap_or("{}");
                serde_json::from_str::<Value>(raw)
                    .map(|value| if value.is_null() { None } else { Some(value) })
                    .map_err(|err| ScenarioError::InvalidBody {
                        session_id: self.session_id.clone(),
                        source: err,
                    })
            }
            ScenarioMethod::Get | ScenarioMethod::Other(_) => Ok(None),
        }
    }
}
