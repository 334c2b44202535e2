//! # esstat - Main Entry Point
//!
//! Supports two operational modes:
//! - **Dashboard** (`esstat <HOST>`): live interactive terminal UI
//! - **Once** (`esstat <HOST> --once`): one refresh cycle, snapshot printed as JSON

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::path::Path;

use esstat::app::{run_dashboard, run_once};
use esstat::cli::Args;
use esstat::domain::ConfigError;
use esstat::source::ElasticsearchClient;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("error: {e:#}");
        std::process::exit(EXIT_ERROR);
    }
    std::process::exit(match run(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

/// Logs go to `--log-file` when given; otherwise only errors reach stderr so
/// they do not scribble over the dashboard.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_level = if log_file.is_some() { "info" } else { "error" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

#[tokio::main]
async fn run(args: Args) -> Result<()> {
    let config = args.config()?;
    info!(
        "esstat v{} polling {} every {:?}",
        env!("CARGO_PKG_VERSION"),
        config.base_url,
        config.interval
    );

    let client = ElasticsearchClient::new(config.base_url.clone(), config.timeout)
        .context("failed to build HTTP client")?;

    if config.once {
        let snapshot = run_once(&config, client).await?;
        println!("{}", serde_json::to_string_pretty(&*snapshot)?);
        return Ok(());
    }

    run_dashboard(&config, client).await.context("dashboard failed")?;
    Ok(())
}
