// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cmder: run a command with timeouts, retries and output forwarding.

mod args;
mod duration;
mod env;
mod exit_error;
mod report;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;
use crate::exit_error::ExitError;
use crate::report::{process_exit_code, OutcomeReport};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = execute(cli).await {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("cmder: {exit}");
                }
                exit.code
            }
            None => {
                eprintln!("cmder: {err:#}");
                2
            }
        };
        std::process::exit(code);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

async fn execute(cli: Cli) -> Result<()> {
    if let Some(cwd) = &cli.cwd {
        anyhow::ensure!(cwd.is_dir(), "working directory {} does not exist", cwd.display());
    }
    let spec = cli.to_spec();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, canceling");
            on_interrupt.cancel();
        }
    });

    let outcome = cmder_engine::run_with_cancel(&spec, &cancel).await;

    if cli.json {
        let json = serde_json::to_string_pretty(&OutcomeReport::new(&spec, &outcome))
            .context("serializing outcome")?;
        println!("{json}");
    }

    match &outcome.error {
        None => Ok(()),
        // The JSON report already carries the error.
        Some(_) if cli.json => Err(ExitError::new(process_exit_code(&outcome), "").into()),
        Some(error) => Err(ExitError::new(process_exit_code(&outcome), error.to_string()).into()),
    }
}
