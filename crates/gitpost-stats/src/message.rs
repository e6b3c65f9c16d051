// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Commit message checks
//!
//! Flags subjects that make poor blog material: empty ones, overly long
//! ones and work-in-progress commits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subjects longer than this many characters are flagged
pub const MAX_SUBJECT_CHARS: usize = 100;

/// A problem found in a commit subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageIssue {
    /// Nothing but whitespace
    Empty,
    /// More than [`MAX_SUBJECT_CHARS`] characters
    TooLong,
    /// Starts with `WIP` or `wip`
    WorkInProgress,
}

impl MessageIssue {
    /// Korean description shown in reports
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Empty => "커밋 메시지가 비어있습니다.",
            Self::TooLong => "커밋 메시지가 너무 깁니다 (100자 초과).",
            Self::WorkInProgress => "WIP(작업 중) 커밋입니다.",
        }
    }
}

impl fmt::Display for MessageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Issues found in `message`, in check order; empty means the subject is fine
///
/// Length is counted in characters, so Hangul subjects are not penalized
/// for their UTF-8 width.
#[must_use]
pub fn validate_commit_message(message: &str) -> Vec<MessageIssue> {
    let mut issues = Vec::new();
    if message.trim().is_empty() {
        issues.push(MessageIssue::Empty);
    }
    if message.chars().count() > MAX_SUBJECT_CHARS {
        issues.push(MessageIssue::TooLong);
    }
    if message.starts_with("WIP") || message.starts_with("wip") {
        issues.push(MessageIssue::WorkInProgress);
    }
    issues
}
