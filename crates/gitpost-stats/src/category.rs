// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Per-commit category inference
//!
//! A commit subject is classified by its Conventional Commits prefix when it
//! has one, otherwise by Korean keywords, otherwise as [`CommitCategory::Other`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Work category of a single commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitCategory {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Documentation
    Docs,
    /// Formatting / styling
    Style,
    /// Refactoring
    Refactor,
    /// Tests
    Test,
    /// Maintenance
    Chore,
    /// Performance
    Perf,
    /// Continuous integration
    Ci,
    /// Build system
    Build,
    /// Revert of an earlier commit
    Revert,
    /// Anything unrecognized
    Other,
}

impl CommitCategory {
    /// Every category, in declaration order
    pub const ALL: [Self; 12] = [
        Self::Feat,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Test,
        Self::Chore,
        Self::Perf,
        Self::Ci,
        Self::Build,
        Self::Revert,
        Self::Other,
    ];

    /// Lowercase token, as used in Conventional Commits
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Perf => "perf",
            Self::Ci => "ci",
            Self::Build => "build",
            Self::Revert => "revert",
            Self::Other => "other",
        }
    }

    /// Look up a category by token, case-insensitively
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(token))
    }

    /// Emoji shown next to the category in reports
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Feat => "✨",
            Self::Fix => "🐛",
            Self::Docs => "📝",
            Self::Style => "💄",
            Self::Refactor => "♻️",
            Self::Test => "✅",
            Self::Chore => "🔧",
            Self::Perf => "⚡",
            _ => "📦",
        }
    }
}

impl fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static CONVENTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(feat|fix|docs|style|refactor|test|chore|perf|ci|build|revert)(\(.+\))?:")
        .expect("conventional commit pattern is valid")
});

/// Keyword groups tried in order when there is no conventional prefix
const KEYWORD_GROUPS: &[(&[&str], CommitCategory)] = &[
    (&["기능", "추가"], CommitCategory::Feat),
    (&["수정", "버그"], CommitCategory::Fix),
    (&["문서"], CommitCategory::Docs),
    (&["리팩토링", "개선"], CommitCategory::Refactor),
    (&["테스트"], CommitCategory::Test),
    (&["스타일"], CommitCategory::Style),
];

/// Classify a commit subject into exactly one category
#[must_use]
pub fn categorize(subject: &str) -> CommitCategory {
    if let Some(token) = CONVENTIONAL_PREFIX
        .captures(subject)
        .and_then(|caps| caps.get(1))
        .and_then(|m| CommitCategory::from_token(m.as_str()))
    {
        return token;
    }

    KEYWORD_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| subject.contains(k)))
        .map_or(CommitCategory::Other, |(_, category)| *category)
}
