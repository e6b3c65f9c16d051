// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! gitpost: turn recent git history into a blog post draft
//!
//! This binary reads the commit log of a repository, prints statistics and
//! builds a prompt for a generative-text model.

use std::process::ExitCode;

use clap::Parser;
use gitpost::commands;
use gitpost::config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "Starting gitpost");

    match commands::execute(&config).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}
