use std::path::Path;

use tracing::{debug, info, warn};

use dialogue_probe::args::{OutputFormat, ProbeArgs};
use dialogue_probe::config::{RunnerConfig, SamConfig, load_samconfig};
use dialogue_probe::error::{AppError, AppResult, ValidationError};
use dialogue_probe::http::{ClientOptions, ReqwestTransport};
use dialogue_probe::runner::{ScenarioRunner, TracingObserver};
use dialogue_probe::scenario::{ScenarioTable, load_scenarios_file};
use dialogue_probe::summary::{render_summary, write_summary};

pub(super) enum RunPlan {
    List(ScenarioTable),
    Run(Box<RunDetails>),
}

pub(super) struct RunDetails {
    config: RunnerConfig,
    table: ScenarioTable,
    samconfig: Option<SamConfig>,
    client: ClientOptions,
    output_format: OutputFormat,
    output: Option<String>,
}

pub(super) fn build_plan(args: ProbeArgs) -> AppResult<RunPlan> {
    let table = match args.scenarios.as_deref() {
        Some(path) => load_scenarios_file(Path::new(path))?,
        None => ScenarioTable::builtin(),
    };
    let table = table.select(&args.cases)?;

    if args.list {
        return Ok(RunPlan::List(table));
    }

    let samconfig = load_samconfig(args.samconfig.as_deref())?;

    Ok(RunPlan::Run(Box::new(RunDetails {
        config: RunnerConfig::new(args.api_url, args.deploy_env),
        table,
        samconfig,
        client: ClientOptions {
            timeout: args.timeout,
        },
        output_format: args.output_format,
        output: args.output,
    })))
}

pub(super) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::List(table) => {
            for session_id in table.session_ids() {
                println!("{}", session_id);
            }
            Ok(())
        }
        RunPlan::Run(details) => run_cases(*details).await,
    }
}

async fn run_cases(details: RunDetails) -> AppResult<()> {
    let RunDetails {
        config,
        table,
        samconfig,
        client,
        output_format,
        output,
    } = details;

    log_deploy_profile(&config, samconfig.as_ref());
    if config.uses_placeholder_url() {
        warn!("API_URL is not set; requests will target the '{}' placeholder.", config.base_url);
    }

    let transport = ReqwestTransport::new(&client)?;
    let runner = ScenarioRunner::new(config, transport, TracingObserver);
    let report = runner.run_all(&table).await;

    let rendered = render_summary(&report, runner.config(), output_format)?;
    write_summary(&rendered, output.as_deref())?;

    if report.is_success() {
        info!("All {} cases passed.", report.total());
        Ok(())
    } else {
        Err(AppError::validation(ValidationError::CasesFailed {
            failed: report.failed(),
            total: report.total(),
        }))
    }
}

fn log_deploy_profile(config: &RunnerConfig, samconfig: Option<&SamConfig>) {
    let Some(samconfig) = samconfig else {
        debug!("No deployment config loaded.");
        return;
    };
    if samconfig.profile(&config.deploy_env).is_none() {
        debug!(
            "Deployment config has no '{}' profile.",
            config.deploy_env
        );
        return;
    }
    match samconfig.stack_name(&config.deploy_env) {
        Some(stack_name) => debug!(
            deploy_env = %config.deploy_env,
            stack_name = %stack_name,
            "Loaded deployment profile"
        ),
        None => debug!(deploy_env = %config.deploy_env, "Loaded deployment profile"),
    }
}
