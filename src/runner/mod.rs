//! Scenario execution: one request per scenario, asserting HTTP 200.
mod observer;
mod outcome;

#[cfg(test)]
mod tests;

pub use observer::{RunEvent, RunObserver, TracingObserver};
pub use outcome::{CaseFailure, CaseOutcome, CaseReport, EXPECTED_STATUS, RunReport};

use crate::config::RunnerConfig;
use crate::http::{Transport, TransportResponse};
use crate::scenario::{Scenario, ScenarioTable};

/// Drives scenarios against `config.base_url` through an injected transport,
/// reporting progress to an injected observer. Holds no mutable state.
#[derive(Debug)]
pub struct ScenarioRunner<T, O> {
    config: RunnerConfig,
    transport: T,
    observer: O,
}

impl<T, O> ScenarioRunner<T, O>
where
    T: Transport,
    O: RunObserver,
{
    #[must_use]
    pub const fn new(config: RunnerConfig, transport: T, observer: O) -> Self {
        Self {
            config,
            transport,
            observer,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Runs one scenario. Failures are reported in the returned
    /// [`CaseReport`], never retried.
    pub async fn run(&self, scenario: &Scenario) -> CaseReport {
        let url = self.config.target_url(scenario.path_id());
        let method = scenario.method().as_str();
        self.observer.on_event(&RunEvent::SendingRequest {
            url: &url,
            method,
            session_id: &scenario.session_id,
        });

        let outcome = match self.exchange(scenario, &url).await {
            Ok(response) => self.check_response(scenario, &response),
            Err(failure) => CaseOutcome::Failed(failure),
        };
        if let CaseOutcome::Failed(failure) = &outcome {
            self.observer.on_event(&RunEvent::CaseFailed {
                session_id: &scenario.session_id,
                failure,
            });
        }

        CaseReport {
            session_id: scenario.session_id.clone(),
            method: method.to_owned(),
            url,
            outcome,
        }
    }

    /// Runs every scenario in table order, one at a time.
    pub async fn run_all(&self, table: &ScenarioTable) -> RunReport {
        let mut cases = Vec::with_capacity(table.len());
        for scenario in table {
            cases.push(self.run(scenario).await);
        }
        RunReport { cases }
    }

    async fn exchange(
        &self,
        scenario: &Scenario,
        url: &str,
    ) -> Result<TransportResponse, CaseFailure> {
        let method = scenario.request_method()?;
        let body = scenario.json_body()?;
        let response = self.transport.request(&method, url, body.as_ref()).await?;
        Ok(response)
    }

    fn check_response(&self, scenario: &Scenario, response: &TransportResponse) -> CaseOutcome {
        self.observer.on_event(&RunEvent::ReceivedResponse {
            status_code: response.status,
            content: &response.text,
            session_id: &scenario.session_id,
        });

        if response.status != EXPECTED_STATUS {
            return CaseOutcome::Failed(CaseFailure::UnexpectedStatus {
                session_id: scenario.session_id.clone(),
                status: response.status,
                expected: EXPECTED_STATUS,
            });
        }

        self.observer.on_event(&RunEvent::ResponseText {
            text: &response.text,
        });
        CaseOutcome::Passed {
            status: response.status,
        }
    }
}
