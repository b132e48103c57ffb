mod cli;
mod config;
mod scenario;
mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use law_firm::FormContext;
use time::{Date, OffsetDateTime};

use crate::cli::Opts;
use crate::scenario::Scenario;

fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();

    let opts = Opts::parse();
    // The local offset can only be read while the process is single-threaded.
    let today = opts.today(OffsetDateTime::now_local().ok());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?
        .block_on(run(opts, today))
}

async fn run(opts: Opts, today: Date) -> anyhow::Result<()> {
    let settings =
        crate::config::read_config(&opts.config_dir).context("Failed to read configuration")?;
    telemetry::init_tracing(
        &settings.application.log_filter,
        settings.application.json_logs,
    )?;

    let scenario = Scenario::from_file(&opts.scenario)?;
    let user = opts.user.unwrap_or(settings.application.user);
    let records = Arc::new(settings.records.into_records());

    let outcome = scenario::run(scenario, records, FormContext::new(today, user)).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
