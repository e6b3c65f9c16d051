// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Subcommand handlers
//!
//! Every handler returns the text destined for stdout; the binary decides
//! how to print it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use gitpost_git::{CommitRecord, collect_commit_hours, collect_commits};
use gitpost_stats::{
    CommitStats, DEFAULT_MAJOR_CHANGES, FileChange, analyze_commits_with, format_hourly_activity,
    format_major_changes, format_message_issues, format_preview, format_stats, format_summary,
    hourly_activity, infer_work_areas, major_changes,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{Command, Config, LogArgs, PromptArgs};
use crate::context::GenerationContext;
use crate::output::{append_markdown, save_markdown, with_front_matter};
use crate::prompt::build_prompt;

/// Run the configured subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, git extraction fails,
/// the context file is unreadable or the output file cannot be written.
pub async fn execute(config: &Config) -> anyhow::Result<String> {
    config.validate()?;
    let repo = config.repo_path();

    match config.command {
        None => preview(&repo, &config.log_args()).await,
        Some(Command::Preview { ref log }) => preview(&repo, log).await,
        Some(Command::Stats { ref log, json }) => stats(&repo, log, json).await,
        Some(Command::Prompt(ref args)) => {
            let path = config.context_path();
            let ctx = GenerationContext::load(&path)
                .with_context(|| format!("Failed to load context from {}", path.display()))?
                .with_env_overrides();
            prompt(&repo, args, ctx).await
        }
    }
}

async fn load_commits(repo: &Path, log: &LogArgs) -> anyhow::Result<Vec<CommitRecord>> {
    collect_commits(repo, &log.to_query())
        .await
        .inspect_err(|e| debug!(code = e.code(), "git extraction failed"))
        .with_context(|| format!("Failed to read git history of {}", repo.display()))
}

async fn load_hours(repo: &Path, log: &LogArgs) -> anyhow::Result<Vec<u32>> {
    collect_commit_hours(repo, &log.to_query())
        .await
        .inspect_err(|e| debug!(code = e.code(), "git timestamp extraction failed"))
        .with_context(|| format!("Failed to read commit times of {}", repo.display()))
}

/// JSON shape of the `stats` subcommand
#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: &'a CommitStats,
    hourly_activity: BTreeMap<u32, usize>,
    major_changes: Vec<FileChange>,
}

/// Commit list followed by a short summary
///
/// # Errors
///
/// Returns an error if git extraction fails.
pub async fn preview(repo: &Path, log: &LogArgs) -> anyhow::Result<String> {
    let commits = load_commits(repo, log).await?;
    let mut out = format_preview(&commits, log.days);
    if commits.is_empty() {
        return Ok(out);
    }

    let stats = analyze_commits_with(&commits, &log.analysis_options());
    out.push_str(&format_summary(&stats, &infer_work_areas(&commits)));
    Ok(out)
}

/// Markdown statistics report, or the statistics as pretty JSON
///
/// Both forms add the per-hour histogram and the most-changed files. The
/// Markdown form also lists commit subjects worth rewording.
///
/// # Errors
///
/// Returns an error if git extraction or JSON serialization fails.
pub async fn stats(repo: &Path, log: &LogArgs, json: bool) -> anyhow::Result<String> {
    let commits = load_commits(repo, log).await?;
    let hours = load_hours(repo, log).await?;
    let stats = analyze_commits_with(&commits, &log.analysis_options());
    let report = StatsReport {
        stats: &stats,
        hourly_activity: hourly_activity(&hours),
        major_changes: major_changes(&commits, DEFAULT_MAJOR_CHANGES),
    };

    if json {
        let mut text =
            serde_json::to_string_pretty(&report).context("Failed to serialize statistics")?;
        text.push('\n');
        return Ok(text);
    }

    let mut out = format_stats(&stats);
    out.push_str(&format_hourly_activity(&report.hourly_activity));
    out.push_str(&format_major_changes(&report.major_changes));
    out.push_str(&format_message_issues(&commits));
    Ok(out)
}

/// Build the prompt and print it or save it to a file
///
/// Command-line flags take precedence over the context file.
///
/// # Errors
///
/// Returns an error if git extraction fails or the output file cannot be
/// written.
pub async fn prompt(
    repo: &Path,
    args: &PromptArgs,
    mut ctx: GenerationContext,
) -> anyhow::Result<String> {
    if let Some(template) = args.template {
        ctx.template = template;
    }
    if args.no_stats {
        ctx.include_stats = false;
    }
    debug!(
        template = %ctx.template,
        include_stats = ctx.include_stats,
        api_key = ?ctx.masked_api_key(),
        "Building prompt"
    );

    let commits = load_commits(repo, &args.log).await?;
    if commits.is_empty() {
        warn!(days = args.log.days, "Nothing to write about");
        return Ok(format_preview(&commits, args.log.days));
    }

    let stats = analyze_commits_with(&commits, &args.log.analysis_options());
    let text = build_prompt(&commits, &stats, &ctx);

    let now = Utc::now();
    let Some(output) = args.output_path(now.date_naive()) else {
        return Ok(text);
    };

    let written = if args.append {
        append_markdown(&output, &text)
            .with_context(|| format!("Failed to append to {}", output.display()))?
    } else {
        let content = if args.front_matter {
            with_front_matter(&text, &args.tags, args.private, now)
        } else {
            text
        };
        save_markdown(&output, &content)
            .with_context(|| format!("Failed to write {}", output.display()))?
    };
    info!(path = %written.display(), append = args.append, "Prompt saved");

    Ok(format!("✨ 저장 완료: {}\n", written.display()))
}
