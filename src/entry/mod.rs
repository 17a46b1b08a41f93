mod plan;

use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches};

use dialogue_probe::args::ProbeArgs;
use dialogue_probe::error::AppResult;
use plan::{build_plan, execute_plan};

pub(crate) fn run() -> AppResult<()> {
    let args = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<ProbeArgs> {
    let cmd = ProbeArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = cmd.get_matches_from(raw_args);
    Ok(ProbeArgs::from_arg_matches(&matches)?)
}

async fn run_async(args: ProbeArgs) -> AppResult<()> {
    let plan = build_plan(args)?;
    execute_plan(plan).await
}
