use tracing::{error, info};

use super::outcome::CaseFailure;

/// Structured progress of a single case.
#[derive(Debug)]
pub enum RunEvent<'event> {
    SendingRequest {
        url: &'event str,
        method: &'event str,
        session_id: &'event str,
    },
    ReceivedResponse {
        status_code: u16,
        content: &'event str,
        session_id: &'event str,
    },
    /// Raw body of a response that passed the status check.
    ResponseText { text: &'event str },
    CaseFailed {
        session_id: &'event str,
        failure: &'event CaseFailure,
    },
}

pub trait RunObserver: Send + Sync {
    fn on_event(&self, event: &RunEvent<'_>);
}

/// Forwards run events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_event(&self, event: &RunEvent<'_>) {
        match event {
            RunEvent::SendingRequest {
                url,
                method,
                session_id,
            } => info!(url = %url, method = %method, session_id = %session_id, "Sending request"),
            RunEvent::ReceivedResponse {
                status_code,
                content,
                session_id,
            } => info!(
                status_code = *status_code,
                content = %content,
                session_id = %session_id,
                "Received response"
            ),
            RunEvent::ResponseText { text } => info!("response.text: {}", text),
            RunEvent::CaseFailed {
                session_id,
                failure,
            } => error!(session_id = %session_id, error = %failure, "Case failed"),
        }
    }
}
