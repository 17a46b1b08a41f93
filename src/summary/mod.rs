//! End-of-run summary rendering.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::args::OutputFormat;
use crate::config::RunnerConfig;
use crate::error::AppResult;
use crate::runner::{CaseReport, RunReport};

#[derive(Debug, Serialize)]
struct SummaryDocument<'report> {
    generated_at: String,
    api_url: &'report str,
    deploy_env: &'report str,
    total: usize,
    passed: usize,
    failed: usize,
    cases: Vec<CaseSummary<'report>>,
}

#[derive(Debug, Serialize)]
struct CaseSummary<'report> {
    session_id: &'report str,
    method: &'report str,
    url: &'report str,
    status: Option<u16>,
    passed: bool,
    error: Option<String>,
}

impl<'report> From<&'report CaseReport> for CaseSummary<'report> {
    fn from(case: &'report CaseReport) -> Self {
        Self {
            session_id: &case.session_id,
            method: &case.method,
            url: &case.url,
            status: case.status(),
            passed: case.passed(),
            error: case.failure().map(ToString::to_string),
        }
    }
}

/// Renders the summary. `Quiet` renders an empty string.
///
/// # Errors
///
/// Returns an error when formatting or JSON serialization fails.
pub fn render_summary(
    report: &RunReport,
    config: &RunnerConfig,
    format: OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Text => render_text(report, config),
        OutputFormat::Json => render_json(report, config),
        OutputFormat::Quiet => Ok(String::new()),
    }
}

/// Writes a rendered summary to `output`, or stdout when unset. Empty
/// summaries are not written.
///
/// # Errors
///
/// Returns an error when the output file cannot be written.
pub fn write_summary(rendered: &str, output: Option<&str>) -> AppResult<()> {
    if rendered.is_empty() {
        return Ok(());
    }
    match output {
        Some(path) => std::fs::write(Path::new(path), rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render_text(report: &RunReport, config: &RunnerConfig) -> AppResult<String> {
    let mut output = String::new();
    for case in &report.cases {
        let verdict = if case.passed() { "PASS" } else { "FAIL" };
        match (case.failure(), case.status()) {
            (Some(failure), _) => writeln!(
                output,
                "{} {} {} {} -> {}",
                verdict, case.session_id, case.method, case.url, failure
            )?,
            (None, Some(status)) => writeln!(
                output,
                "{} {} {} {} -> {}",
                verdict, case.session_id, case.method, case.url, status
            )?,
            (None, None) => writeln!(
                output,
                "{} {} {} {}",
                verdict, case.session_id, case.method, case.url
            )?,
        }
    }
    writeln!(
        output,
        "{} cases: {} passed, {} failed (api_url={}, deploy_env={})",
        report.total(),
        report.passed(),
        report.failed(),
        config.base_url,
        config.deploy_env
    )?;
    Ok(output)
}

fn render_json(report: &RunReport, config: &RunnerConfig) -> AppResult<String> {
    let document = SummaryDocument {
        generated_at: chrono::Utc::now().to_rfc3339(),
        api_url: &config.base_url,
        deploy_env: &config.deploy_env,
        total: report.total(),
        passed: report.passed(),
        failed: report.failed(),
        cases: report.cases.iter().map(CaseSummary::from).collect(),
    };
    let mut rendered = serde_json::to_string_pretty(&document)?;
    rendered.push('\n');
    Ok(rendered)
}
