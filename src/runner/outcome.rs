use thiserror::Error;

use crate::error::{HttpError, ScenarioError};

/// Every case, including error-named ones, must answer with this status.
pub const EXPECTED_STATUS: u16 = 200;

#[derive(Debug, Error)]
pub enum CaseFailure {
    #[error("Unexpected status code for session {session_id}: got {status}, expected {expected}")]
    UnexpectedStatus {
        session_id: String,
        status: u16,
        expected: u16,
    },
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Transport(#[from] HttpError),
}

#[derive(Debug)]
pub enum CaseOutcome {
    Passed { status: u16 },
    Failed(CaseFailure),
}

#[derive(Debug)]
pub struct CaseReport {
    pub session_id: String,
    pub method: String,
    pub url: String,
    pub outcome: CaseOutcome,
}

impl CaseReport {
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed { .. })
    }

    /// Status code received, if the exchange completed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match &self.outcome {
            CaseOutcome::Passed { status }
            | CaseOutcome::Failed(CaseFailure::UnexpectedStatus { status, .. }) => Some(*status),
            CaseOutcome::Failed(CaseFailure::Scenario(_) | CaseFailure::Transport(_)) => None,
        }
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&CaseFailure> {
        match &self.outcome {
            CaseOutcome::Failed(failure) => Some(failure),
            CaseOutcome::Passed { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total().saturating_sub(self.passed())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }
}
