// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Command-line configuration
//!
//! This module provides the clap definitions for the `gitpost` binary,
//! including the repository path, context file location, logging flags and
//! the per-subcommand log window.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gitpost_git::LogQuery;
use gitpost_stats::AnalysisOptions;

use crate::output::{DEFAULT_PREFIX, date_based_filename};
use crate::prompt::PromptTemplate;

/// gitpost - turn recent git history into a blog post draft
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gitpost")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to `preview`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the git repository
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "GITPOST_REPO", global = true)]
    pub repo: Option<PathBuf>,

    /// Path to the generation context JSON file
    ///
    /// Defaults to ~/.config/gitpost/context.json (or platform equivalent).
    /// A missing file means default settings.
    #[arg(long, env = "GITPOST_CONTEXT", global = true)]
    pub context: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr so reports on stdout stay clean.
    #[arg(short, long, default_value = "false", global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(
        short,
        long,
        default_value = "false",
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List recent commits with a short statistics summary
    Preview {
        /// Commit window and filters
        #[command(flatten)]
        log: LogArgs,
    },

    /// Print the Markdown statistics report
    Stats {
        /// Commit window and filters
        #[command(flatten)]
        log: LogArgs,

        /// Print the statistics as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Build a blog-post prompt from recent commits
    ///
    /// The prompt is printed to stdout unless --output is given.
    ///
    /// Example:
    ///   gitpost prompt --days 7 --template quick -o posts/week.md
    ///   gitpost prompt -o              # blog-post-YYYY-MM-DD.md
    Prompt(PromptArgs),
}

/// Commit window and filters shared by every subcommand
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LogArgs {
    /// Look back this many days
    #[arg(short, long, default_value_t = 7)]
    pub days: u32,

    /// Only include commits touching this path
    #[arg(long)]
    pub path: Option<String>,

    /// Only include commits by this author
    #[arg(long)]
    pub author: Option<String>,

    /// Walk this branch instead of HEAD
    #[arg(long)]
    pub branch: Option<String>,

    /// Stop after this many commits
    #[arg(long)]
    pub max_commits: Option<usize>,

    /// Give up on git after this many seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Changed lines above which a commit is flagged for review
    #[arg(long, default_value_t = 200)]
    pub threshold: u64,
}

impl Default for LogArgs {
    fn default() -> Self {
        Self {
            days: 7,
            path: None,
            author: None,
            branch: None,
            max_commits: None,
            timeout_secs: 15,
            threshold: 200,
        }
    }
}

impl LogArgs {
    /// Extractor query for these arguments; touched files are always collected
    #[must_use]
    pub fn to_query(&self) -> LogQuery {
        let mut query = LogQuery::last_days(self.days)
            .with_files()
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ref path) = self.path {
            query = query.path(path);
        }
        if let Some(ref author) = self.author {
            query = query.author(author);
        }
        if let Some(ref branch) = self.branch {
            query = query.branch(branch);
        }
        if let Some(n) = self.max_commits {
            query = query.limit(n);
        }
        query
    }

    /// Analyzer options for these arguments
    #[must_use]
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            large_commit_threshold: self.threshold,
        }
    }
}

/// Arguments of the `prompt` subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct PromptArgs {
    /// Commit window and filters
    #[command(flatten)]
    pub log: LogArgs,

    /// Prompt shape; overrides the context file
    #[arg(long, value_enum)]
    pub template: Option<PromptTemplate>,

    /// Do not append the statistics report
    #[arg(long)]
    pub no_stats: bool,

    /// Write the prompt to this Markdown file
    ///
    /// Without a value the file is named after today's date,
    /// e.g. blog-post-2024-03-09.md.
    #[arg(short, long, num_args = 0..=1, value_name = "FILE")]
    pub output: Option<Option<PathBuf>>,

    /// Append to an existing file after a `---` separator
    #[arg(long, requires = "output", conflicts_with = "front_matter")]
    pub append: bool,

    /// Prepend Velog front matter to the written file
    #[arg(long, requires = "output")]
    pub front_matter: bool,

    /// Front matter tags, comma separated
    #[arg(long, value_delimiter = ',', requires = "front_matter")]
    pub tags: Vec<String>,

    /// Mark the post as private in the front matter
    #[arg(long, requires = "front_matter")]
    pub private: bool,
}

impl PromptArgs {
    /// File the prompt goes to, if any
    ///
    /// A bare `--output` resolves to `blog-post-<today>.md`.
    #[must_use]
    pub fn output_path(&self, today: NaiveDate) -> Option<PathBuf> {
        match self.output {
            None => None,
            Some(Some(ref path)) => Some(path.clone()),
            Some(None) => Some(PathBuf::from(date_based_filename(DEFAULT_PREFIX, today))),
        }
    }
}

impl Config {
    /// Get the repository path, using the current directory as default
    #[must_use]
    pub fn repo_path(&self) -> PathBuf {
        self.repo
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the context file path, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/gitpost/context.json
    /// - Linux: ~/.config/gitpost/context.json
    /// - Windows: %APPDATA%\gitpost\context.json
    #[must_use]
    pub fn context_path(&self) -> PathBuf {
        self.context.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gitpost")
                .join("context.json")
        })
    }

    /// Log arguments of the active subcommand
    #[must_use]
    pub fn log_args(&self) -> LogArgs {
        match self.command {
            Some(Command::Preview { ref log } | Command::Stats { ref log, .. }) => log.clone(),
            Some(Command::Prompt(ref args)) => args.log.clone(),
            None => LogArgs::default(),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is specified but doesn't exist
    /// - The repository path is not a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepositoryNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepositoryNotDirectory(repo.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),
}
