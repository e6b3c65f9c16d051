// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Git log extraction
//!
//! This module shells out to the `git` executable to obtain the raw
//! `--numstat` log for a bounded time window. The call is a single attempt
//! bounded by a timeout and an output cap; the child process is killed if
//! either bound is exceeded.

use crate::commit::CommitRecord;
use crate::error::GitError;
use crate::parser::parse_log;
use chrono::{DateTime, Timelike};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info};

/// `--pretty` format for commit headers: hash, subject, author, date
pub const HEADER_FORMAT: &str = "%H%x1f%s%x1f%an%x1f%ad";

/// `--pretty` format for strict ISO 8601 author timestamps
pub const TIMESTAMP_FORMAT: &str = "%aI";

/// Executable looked up on `PATH` by default
pub const GIT_PROGRAM: &str = "git";

/// Default lookback window in days
pub const DEFAULT_DAYS: u32 = 7;

/// Default wall-clock limit for `git log`
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default cap on `git log` stdout (10 MiB)
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for extracting commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Lookback window in days
    pub days: u32,
    /// Only include commits touching this path or pathspec
    pub path_filter: Option<String>,
    /// Only include commits whose author matches this pattern
    pub author: Option<String>,
    /// Walk this branch instead of HEAD
    pub branch: Option<String>,
    /// Maximum number of commits to retrieve
    pub max_commits: Option<usize>,
    /// Collect the list of touched files per commit
    pub include_files: bool,
    /// Wall-clock limit for the git process
    pub timeout: Duration,
    /// Cap on stdout size in bytes
    pub max_output_bytes: usize,
    /// Executable to run, `git` unless overridden
    pub git_program: String,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            path_filter: None,
            author: None,
            branch: None,
            max_commits: None,
            include_files: false,
            timeout: DEFAULT_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            git_program: GIT_PROGRAM.to_string(),
        }
    }
}

impl LogQuery {
    /// Create a query for the last N days
    #[must_use]
    pub fn last_days(days: u32) -> Self {
        Self {
            days,
            ..Default::default()
        }
    }

    /// Collect touched files for each commit
    #[must_use]
    pub fn with_files(mut self) -> Self {
        self.include_files = true;
        self
    }

    /// Restrict to a path or pathspec
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path_filter = Some(path.to_string());
        self
    }

    /// Restrict to an author
    #[must_use]
    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    /// Walk a specific branch
    #[must_use]
    pub fn branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    /// Limit the number of commits
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.max_commits = Some(n);
        self
    }

    /// Set the process timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the stdout cap
    #[must_use]
    pub fn max_output_bytes(mut self, bytes: usize) -> Self {
        self.max_output_bytes = bytes;
        self
    }

    /// Run a different git executable
    #[must_use]
    pub fn git_program(mut self, program: &str) -> Self {
        self.git_program = program.to_string();
        self
    }

    /// The `--since` boundary understood by git, e.g. `7.days.ago`
    #[must_use]
    pub fn since_spec(&self) -> String {
        format!("{}.days.ago", self.days)
    }

    /// Arguments passed to `git`, in order
    ///
    /// Options come first, then the optional revision after
    /// `--end-of-options`, then the pathspec after `--`.
    #[must_use]
    pub fn git_args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            format!("--pretty=format:{HEADER_FORMAT}"),
            "--date=short".to_string(),
            "--numstat".to_string(),
            format!("--since={}", self.since_spec()),
        ];
        self.push_filters(&mut args);
        args
    }

    /// Arguments for listing author timestamps of the same commits
    #[must_use]
    pub fn timestamp_args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            format!("--pretty=format:{TIMESTAMP_FORMAT}"),
            format!("--since={}", self.since_spec()),
        ];
        self.push_filters(&mut args);
        args
    }

    fn push_filters(&self, args: &mut Vec<String>) {
        if let Some(n) = self.max_commits {
            args.push(format!("--max-count={n}"));
        }
        if let Some(ref author) = self.author {
            args.push(format!("--author={author}"));
        }
        if let Some(ref branch) = self.branch {
            // A branch such as `--output=x` must not be read as an option
            args.push("--end-of-options".to_string());
            args.push(branch.clone());
        }
        if let Some(ref path) = self.path_filter {
            args.push("--".to_string());
            args.push(path.clone());
        }
    }
}

/// Run `git log` and return its raw output
///
/// A repository without any commits yields an empty string.
///
/// # Errors
///
/// - `GitError::RepositoryNotFound` if `repo` is not a directory or not a repository
/// - `GitError::GitNotInstalled` if the `git` executable is missing
/// - `GitError::Timeout` if git does not finish within `query.timeout`
/// - `GitError::OutputTooLarge` if stdout exceeds `query.max_output_bytes`
/// - `GitError::CommandFailed` for any other non-zero exit
pub async fn extract_log(repo: impl AsRef<Path>, query: &LogQuery) -> Result<String, GitError> {
    run_git(repo.as_ref(), &query.git_args(), query).await
}

/// Build the git invocation with messages forced to the C locale
///
/// Failures are classified by matching git's English stderr, so translated
/// messages must not reach [`classify_failure`].
fn git_command(program: &str, args: &[String], repo: &Path) -> Command {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(repo)
        .env("LC_ALL", "C")
        .env_remove("LANGUAGE")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    command
}

async fn run_git(repo: &Path, args: &[String], query: &LogQuery) -> Result<String, GitError> {
    if !repo.is_dir() {
        return Err(GitError::RepositoryNotFound {
            path: repo.display().to_string(),
        });
    }

    debug!(repo = %repo.display(), program = %query.git_program, ?args, "Running git log");

    let mut child = git_command(&query.git_program, args, repo)
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => GitError::GitNotInstalled,
            _ => GitError::Io(e),
        })?;

    let limit = query.max_output_bytes;

    let run = async {
        let stderr_task = tokio::spawn(read_capped(child.stderr.take(), limit));
        let stdout = read_capped(child.stdout.take(), limit).await?;
        if stdout.len() > limit {
            child.kill().await?;
            return Err(GitError::OutputTooLarge { limit });
        }
        let status = child.wait().await?;
        let stderr = stderr_task.await.map_err(std::io::Error::other)??;
        Ok::<_, GitError>((status, stdout, stderr))
    };

    // On timeout `child` is dropped on return, which kills git
    let (status, stdout, stderr) = tokio::time::timeout(query.timeout, run)
        .await
        .map_err(|_| GitError::Timeout {
            seconds: query.timeout.as_secs(),
        })??;

    let stderr = String::from_utf8_lossy(&stderr).into_owned();

    if !status.success() {
        return classify_failure(repo, &status.to_string(), stderr);
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Read a child pipe, stopping one byte past `limit`
async fn read_capped<R>(pipe: Option<R>, limit: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(pipe) = pipe {
        let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
        pipe.take(cap).read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Map a non-zero git exit to an error (or to an empty log)
fn classify_failure(repo: &Path, status: &str, stderr: String) -> Result<String, GitError> {
    if stderr.contains("not a git repository") {
        return Err(GitError::RepositoryNotFound {
            path: repo.display().to_string(),
        });
    }
    if stderr.contains("does not have any commits") {
        debug!(repo = %repo.display(), "Repository has no commits yet");
        return Ok(String::new());
    }
    Err(GitError::CommandFailed {
        status: status.to_string(),
        stderr: stderr.trim().to_string(),
    })
}

/// Extract and parse commits for the given query
///
/// Commits are returned newest first, as git emits them.
///
/// # Errors
///
/// Propagates any [`GitError`] from [`extract_log`].
pub async fn collect_commits(
    repo: impl AsRef<Path>,
    query: &LogQuery,
) -> Result<Vec<CommitRecord>, GitError> {
    let raw = extract_log(repo, query).await?;
    if raw.trim().is_empty() {
        info!(days = query.days, "No commits in lookback window");
        return Ok(Vec::new());
    }

    let commits = parse_log(&raw, query.include_files);
    info!(
        count = commits.len(),
        days = query.days,
        "Collected commits from git log"
    );
    Ok(commits)
}

/// Author-local hour (0-23) of every commit matched by `query`
///
/// Uses the same window and filters as [`collect_commits`], newest first.
/// Lines that are not ISO 8601 timestamps are skipped.
///
/// # Errors
///
/// Same as [`extract_log`].
pub async fn collect_commit_hours(
    repo: impl AsRef<Path>,
    query: &LogQuery,
) -> Result<Vec<u32>, GitError> {
    let raw = run_git(repo.as_ref(), &query.timestamp_args(), query).await?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match DateTime::parse_from_rfc3339(line) {
            Ok(timestamp) => Some(timestamp.hour()),
            Err(e) => {
                debug!(line, error = %e, "Skipping unparseable timestamp");
                None
            }
        })
        .collect())
}
