use std::future::Future;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use super::*;
use crate::config::RunnerConfig;
use crate::error::{HttpError, ScenarioError};
use crate::http::{Transport, TransportResponse};
use crate::scenario::{Scenario, ScenarioTable};

const BASE_URL: &str = "https://api.example.test/Prod/session";

#[derive(Debug, Clone, PartialEq)]
struct RecordedCall {
    method: Method,
    url: String,
    body: Option<Value>,
}

#[derive(Debug)]
struct MockTransport {
    default_status: u16,
    overrides: Vec<(Method, u16)>,
    unreachable: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    fn with_status(status: u16) -> Self {
        Self {
            default_status: status,
            overrides: Vec::new(),
            unreachable: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::with_status(200)
        }
    }

    fn calls(&self) -> Result<Vec<RecordedCall>, String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .map_err(|err| format!("calls lock poisoned: {}", err))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: &Method,
        url: &str,
        json_body: Option<&Value>,
    ) -> Result<TransportResponse, HttpError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: method.clone(),
                url: url.to_owned(),
                body: json_body.cloned(),
            });
        }
        if self.unreachable {
            return Err(HttpError::InvalidUrl {
                url: url.to_owned(),
                source: url::ParseError::RelativeUrlWithoutBase,
            });
        }
        let status = self
            .overrides
            .iter()
            .find(|(candidate, _)| candidate == method)
            .map_or(self.default_status, |(_, status)| *status);
        Ok(TransportResponse {
            status,
            text: format!("{{\"method\": \"{}\"}}", method),
        })
    }
}

#[derive(Debug, Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Result<Vec<String>, String> {
        self.events
            .lock()
            .map(|events| events.clone())
            .map_err(|err| format!("events lock poisoned: {}", err))
    }
}

impl RunObserver for RecordingObserver {
    fn on_event(&self, event: &RunEvent<'_>) {
        let line = match event {
            RunEvent::SendingRequest {
                url,
                method,
                session_id,
            } => format!("send {} {} {}", session_id, method, url),
            RunEvent::ReceivedResponse {
                status_code,
                session_id,
                ..
            } => format!("recv {} {}", session_id, status_code),
            RunEvent::ResponseText { text } => format!("text {}", text),
            RunEvent::CaseFailed { session_id, .. } => format!("fail {}", session_id),
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(line);
        }
    }
}

fn runner(transport: MockTransport) -> ScenarioRunner<MockTransport, RecordingObserver> {
    ScenarioRunner::new(
        RunnerConfig::new(BASE_URL, "default"),
        transport,
        RecordingObserver::default(),
    )
}

fn builtin(session_id: &str) -> Result<Scenario, String> {
    ScenarioTable::builtin()
        .get(session_id)
        .cloned()
        .ok_or_else(|| format!("Missing builtin scenario {}", session_id))
}

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

#[test]
fn one_request_per_scenario_with_declared_method() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::with_status(200));
        let table = ScenarioTable::builtin();
        let report = runner.run_all(&table).await;

        if !report.is_success() || report.passed() != table.len() {
            return Err(format!("Expected all cases to pass: {:?}", report));
        }
        let calls = runner.transport().calls()?;
        if calls.len() != table.len() {
            return Err(format!("Expected {} calls, got {}", table.len(), calls.len()));
        }
        for (scenario, call) in table.iter().zip(&calls) {
            let expected_url = format!("{}/{}", BASE_URL, scenario.path_id());
            if call.url != expected_url {
                return Err(format!("{}: unexpected url {}", scenario.session_id, call.url));
            }
            if call.method.as_str() != scenario.method().as_str() {
                return Err(format!(
                    "{}: unexpected method {}",
                    scenario.session_id, call.method
                ));
            }
        }
        Ok(())
    })
}

#[test]
fn new_session_post_sends_documented_body() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::with_status(200));
        let report = runner.run(&builtin("post_session_new")?).await;
        if !report.passed() {
            return Err(format!("Expected pass: {:?}", report));
        }
        let calls = runner.transport().calls()?;
        let expected = RecordedCall {
            method: Method::POST,
            url: format!("{}/new-session-id", BASE_URL),
            body: Some(json!({
                "users": [
                    {"name": "Seth", "role": "Wizard"},
                    {"name": "Hank", "role": "Warrior"}
                ],
                "user": "Seth",
                "msg": "I cast a fireball at the orc."
            })),
        };
        if calls != [expected] {
            return Err(format!("Unexpected calls: {:?}", calls));
        }
        Ok(())
    })
}

#[test]
fn get_success_fails_on_non_200() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::with_status(404));
        let report = runner.run(&builtin("get_session_success")?).await;
        match report.failure() {
            Some(CaseFailure::UnexpectedStatus {
                session_id, status, ..
            }) if session_id == "get_session_success" && *status == 404 => {}
            other => return Err(format!("Expected UnexpectedStatus, got {:?}", other)),
        }
        let message = report
            .failure()
            .map(ToString::to_string)
            .unwrap_or_default();
        if !message.contains("Unexpected status code for session get_session_success") {
            return Err(format!("Message does not name the session: {}", message));
        }
        if report.status() != Some(404) {
            return Err(format!("Unexpected status: {:?}", report.status()));
        }
        Ok(())
    })
}

#[test]
fn invalid_method_case_still_expects_200() -> Result<(), String> {
    run_async_test(async {
        let scenario = builtin("post_invalid_method")?;

        let passing = runner(MockTransport::with_status(200));
        let report = passing.run(&scenario).await;
        if !report.passed() {
            return Err(format!("PUT answered with 200 must pass: {:?}", report));
        }
        let calls = passing.transport().calls()?;
        let sent = calls.first().ok_or_else(|| "Missing call".to_owned())?;
        if sent.method != Method::PUT || sent.body.is_some() {
            return Err(format!("Unexpected call: {:?}", sent));
        }

        let rejecting = runner(MockTransport {
            overrides: vec![(Method::PUT, 405)],
            ..MockTransport::with_status(200)
        });
        let report = rejecting.run(&scenario).await;
        if report.passed() || report.status() != Some(405) {
            return Err(format!("PUT answered with 405 must fail: {:?}", report));
        }
        Ok(())
    })
}

#[test]
fn events_follow_request_response_order() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::with_status(200));
        let report = runner.run(&builtin("get_session_success")?).await;
        if !report.passed() {
            return Err(format!("Expected pass: {:?}", report));
        }
        let events = runner.observer().events()?;
        let expected = [
            format!(
                "send get_session_success GET {}/test-session-id",
                BASE_URL
            ),
            "recv get_session_success 200".to_owned(),
            "text {\"method\": \"GET\"}".to_owned(),
        ];
        if events != expected {
            return Err(format!("Unexpected events: {:?}", events));
        }
        Ok(())
    })
}

#[test]
fn failed_status_skips_response_text_event() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::with_status(500));
        let _report = runner.run(&builtin("get_session_not_found")?).await;
        let events = runner.observer().events()?;
        if events.iter().any(|event| event.starts_with("text ")) {
            return Err(format!("Unexpected text event: {:?}", events));
        }
        if events.last().map(String::as_str) != Some("fail get_session_not_found") {
            return Err(format!("Expected trailing failure event: {:?}", events));
        }
        Ok(())
    })
}

#[test]
fn transport_failure_fails_case_and_run_continues() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::unreachable());
        let table = ScenarioTable::builtin();
        let report = runner.run_all(&table).await;
        if report.failed() != table.len() {
            return Err(format!("Expected every case to fail: {:?}", report));
        }
        if !report
            .cases
            .iter()
            .all(|case| matches!(case.failure(), Some(CaseFailure::Transport(_))))
        {
            return Err("Expected transport failures".to_owned());
        }
        if runner.transport().calls()?.len() != table.len() {
            return Err("Every case must still be attempted".to_owned());
        }
        Ok(())
    })
}

#[test]
fn malformed_body_fails_without_request() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::with_status(200));
        let mut scenario = Scenario::new("broken_body", "POST", "abc");
        scenario.payload.body = Some("{\"user\":".to_owned());
        let report = runner.run(&scenario).await;
        match report.failure() {
            Some(CaseFailure::Scenario(ScenarioError::InvalidBody { .. })) => {}
            other => return Err(format!("Expected InvalidBody, got {:?}", other)),
        }
        if !runner.transport().calls()?.is_empty() {
            return Err("No request may be sent for an invalid body".to_owned());
        }
        Ok(())
    })
}

#[test]
fn repeated_get_yields_same_status() -> Result<(), String> {
    run_async_test(async {
        let runner = runner(MockTransport::with_status(200));
        let scenario = builtin("get_session_success")?;
        let first = runner.run(&scenario).await;
        let second = runner.run(&scenario).await;
        if first.status() != second.status() || first.passed() != second.passed() {
            return Err(format!("Runs diverged: {:?} vs {:?}", first, second));
        }
        let calls = runner.transport().calls()?;
        if calls.len() != 2 || calls.first() != calls.get(1) {
            return Err(format!("Expected two identical calls: {:?}", calls));
        }
        Ok(())
    })
}
