// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Batch-level work area inference
//!
//! Unlike [`categorize`](crate::category::categorize), which assigns exactly
//! one category per commit, this looks at a whole batch and returns every
//! work area that at least one commit touches. Each commit is matched on its
//! subject plus the touched file paths.

use gitpost_git::CommitRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Coarse work area of a batch of commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkArea {
    /// Feature development
    Feature,
    /// Bug fixing
    Bugfix,
    /// Refactoring and cleanup
    Refactor,
    /// Styling and UI
    Styling,
    /// Documentation
    Docs,
    /// Tests
    Test,
    /// Performance work
    Performance,
    /// Dependency management
    Dependency,
    /// Configuration and setup
    Config,
    /// Fallback when nothing else matched
    General,
}

impl WorkArea {
    /// Human-readable (Korean) label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Feature => "기능 추가",
            Self::Bugfix => "버그 수정",
            Self::Refactor => "리팩토링",
            Self::Styling => "스타일링",
            Self::Docs => "문서화",
            Self::Test => "테스트",
            Self::Performance => "성능 개선",
            Self::Dependency => "의존성",
            Self::Config => "설정",
            Self::General => "개발",
        }
    }
}

impl fmt::Display for WorkArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static PATTERNS: LazyLock<Vec<(WorkArea, Regex)>> = LazyLock::new(|| {
    [
        (WorkArea::Feature, "feat|add|implement|create"),
        (WorkArea::Bugfix, "fix|bug|issue|resolve"),
        (WorkArea::Refactor, "refactor|clean|improve"),
        (WorkArea::Styling, "style|css|design|ui"),
        (WorkArea::Docs, "doc|readme|comment"),
        (WorkArea::Test, "test|spec"),
        (WorkArea::Performance, "perf|optimize|speed"),
        (WorkArea::Dependency, "dep|package|install|upgrade"),
        (WorkArea::Config, "config|setup|env"),
    ]
    .into_iter()
    .map(|(area, pattern)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("work area pattern is valid");
        (area, regex)
    })
    .collect()
});

/// Text a commit is matched on: subject plus touched paths
fn match_text(commit: &CommitRecord) -> String {
    match commit.files.as_deref() {
        Some(files) if !files.is_empty() => format!("{} {}", commit.message, files.join(" ")),
        _ => commit.message.clone(),
    }
}

/// Collect the work areas touched by a batch of commits
///
/// Patterns are independent; one commit may contribute several areas.
/// Returns `{General}` when no pattern matches any commit.
#[must_use]
pub fn infer_work_areas(commits: &[CommitRecord]) -> BTreeSet<WorkArea> {
    let mut areas = BTreeSet::new();

    for commit in commits {
        let text = match_text(commit);
        for (area, regex) in PATTERNS.iter() {
            if regex.is_match(&text) {
                areas.insert(*area);
            }
        }
    }

    if areas.is_empty() {
        areas.insert(WorkArea::General);
    }
    areas
}
