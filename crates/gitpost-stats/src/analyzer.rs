// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Commit analysis
//!
//! Reduces an ordered list of commits into a [`CommitStats`] aggregate. The
//! reduction is total: an empty list yields zeroed counters and empty maps.

use crate::category::{CommitCategory, categorize};
use gitpost_git::CommitRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Changed-line count above which a commit is flagged for review
pub const DEFAULT_LARGE_COMMIT_THRESHOLD: u64 = 200;

/// Extension bucket for paths without one
pub const UNKNOWN_EXTENSION: &str = "unknown";

/// Files listed by [`major_changes`] unless asked otherwise
pub const DEFAULT_MAJOR_CHANGES: usize = 5;

/// Tunables for [`analyze_commits_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Commits with more changed lines than this are "large"
    pub large_commit_threshold: u64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            large_commit_threshold: DEFAULT_LARGE_COMMIT_THRESHOLD,
        }
    }
}

/// Aggregate statistics over a list of commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    /// Number of commits
    pub total_commits: usize,
    /// Sum of added lines
    pub total_additions: u64,
    /// Sum of deleted lines
    pub total_deletions: u64,
    /// Commit count per author name
    pub authors: BTreeMap<String, usize>,
    /// Touched-file count per lowercased extension
    pub file_types: BTreeMap<String, usize>,
    /// Commit count per `YYYY-MM-DD` date
    pub commits_by_day: BTreeMap<String, usize>,
    /// Commit count per inferred category
    pub commit_categories: BTreeMap<CommitCategory, usize>,
    /// Commits above the size threshold, largest first
    pub large_commits: Vec<CommitRecord>,
    /// Mean changed lines per commit, rounded; 0 for no commits
    pub avg_commit_size: u64,
}

impl CommitStats {
    /// Total changed lines (additions + deletions), saturating at `u64::MAX`
    #[must_use]
    pub fn total_changes(&self) -> u64 {
        self.total_additions.saturating_add(self.total_deletions)
    }

    /// Oldest and newest day with commits
    #[must_use]
    pub fn date_range(&self) -> Option<(&str, &str)> {
        let first = self.commits_by_day.keys().next()?;
        let last = self.commits_by_day.keys().next_back()?;
        Some((first.as_str(), last.as_str()))
    }

    /// Number of file touches counted in `file_types`
    #[must_use]
    pub fn files_changed(&self) -> usize {
        self.file_types.values().sum()
    }

    /// Share of all commits, in percent
    #[must_use]
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total_commits == 0 {
            return 0.0;
        }
        count as f64 / self.total_commits as f64 * 100.0
    }
}

/// Analyze commits with the default options
#[must_use]
pub fn analyze_commits(commits: &[CommitRecord]) -> CommitStats {
    analyze_commits_with(commits, &AnalysisOptions::default())
}

/// Analyze commits
///
/// File types are only counted for commits whose `files` were collected.
#[must_use]
pub fn analyze_commits_with(commits: &[CommitRecord], options: &AnalysisOptions) -> CommitStats {
    let mut stats = CommitStats {
        total_commits: commits.len(),
        ..Default::default()
    };

    for commit in commits {
        stats.total_additions = stats.total_additions.saturating_add(commit.additions);
        stats.total_deletions = stats.total_deletions.saturating_add(commit.deletions);

        *stats.authors.entry(commit.author.clone()).or_default() += 1;
        *stats.commits_by_day.entry(commit.date.clone()).or_default() += 1;
        *stats
            .commit_categories
            .entry(categorize(&commit.message))
            .or_default() += 1;

        for file in commit.files.iter().flatten() {
            *stats.file_types.entry(file_extension(file)).or_default() += 1;
        }
    }

    stats.avg_commit_size = rounded_average(stats.total_changes(), commits.len());
    stats.large_commits = find_large_commits(commits, options.large_commit_threshold);

    debug!(
        commits = stats.total_commits,
        authors = stats.authors.len(),
        large = stats.large_commits.len(),
        "Analyzed commits"
    );

    stats
}

/// Commits with more than `threshold` changed lines, largest first
///
/// Commits of equal size keep their input order.
#[must_use]
pub fn find_large_commits(commits: &[CommitRecord], threshold: u64) -> Vec<CommitRecord> {
    let mut large: Vec<CommitRecord> = commits
        .iter()
        .filter(|c| c.total_changes() > threshold)
        .cloned()
        .collect();
    large.sort_by(|a, b| b.total_changes().cmp(&a.total_changes()));
    large
}

/// Lowercased extension of the last path component
///
/// `src/App.TSX` → `tsx`, `.gitignore` → `gitignore`, `Makefile` → `unknown`.
#[must_use]
pub fn file_extension(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => UNKNOWN_EXTENSION.to_string(),
    }
}

/// Change volume attributed to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Repository-relative path
    pub path: String,
    /// Sum of the full size of every commit touching the file
    pub changes: u64,
    /// Hashes of those commits, in input order
    pub commits: Vec<String>,
}

/// The `top_n` files with the most changed lines
///
/// Each file is credited with the whole size of every commit that touched
/// it, since numstat totals are kept per commit. Ties keep first-seen order.
/// Commits without collected files contribute nothing.
#[must_use]
pub fn major_changes(commits: &[CommitRecord], top_n: usize) -> Vec<FileChange> {
    let mut changes: Vec<FileChange> = Vec::new();
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();

    for commit in commits {
        for file in commit.files.iter().flatten() {
            let slot = *index.entry(file.as_str()).or_insert_with(|| {
                changes.push(FileChange {
                    path: file.clone(),
                    changes: 0,
                    commits: Vec::new(),
                });
                changes.len() - 1
            });
            let entry = &mut changes[slot];
            entry.changes = entry.changes.saturating_add(commit.total_changes());
            if entry.commits.last() != Some(&commit.hash) {
                entry.commits.push(commit.hash.clone());
            }
        }
    }

    changes.sort_by(|a, b| b.changes.cmp(&a.changes));
    changes.truncate(top_n);
    changes
}

/// Commit count per hour of day (0-23)
///
/// Hours outside that range are ignored.
#[must_use]
pub fn hourly_activity(hours: &[u32]) -> BTreeMap<u32, usize> {
    let mut histogram = BTreeMap::new();
    for &hour in hours.iter().filter(|h| **h < 24) {
        *histogram.entry(hour).or_default() += 1;
    }
    histogram
}

/// `round(total / count)` with halves rounded up, 0 when `count` is 0
fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let total = u128::from(total);
    let count = count as u128;
    u64::try_from((2 * total + count) / (2 * count)).unwrap_or(u64::MAX)
}
