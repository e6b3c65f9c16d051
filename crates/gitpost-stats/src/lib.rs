// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! gitpost-stats: Commit statistics for gitpost
//!
//! This library crate reduces a list of [`CommitRecord`] values into
//! aggregate [`CommitStats`], classifies commits into work categories and
//! renders the result as a Markdown report.
//!
//! # Example
//!
//! ```
//! use gitpost_git::CommitRecord;
//! use gitpost_stats::{analyze_commits, format_stats};
//!
//! let mut commit = CommitRecord::new("aaa1111", "fix: null pointer", "Kim", "2024-01-01");
//! commit.additions = 10;
//!
//! let stats = analyze_commits(&[commit]);
//! assert_eq!(stats.total_commits, 1);
//! assert!(format_stats(&stats).contains("**총 커밋 수**: 1개"));
//! ```
//!
//! [`CommitRecord`]: gitpost_git::CommitRecord

#![warn(missing_docs)]

pub mod analyzer;
pub mod category;
pub mod message;
pub mod report;
pub mod work_area;

pub use analyzer::{
    AnalysisOptions, CommitStats, DEFAULT_MAJOR_CHANGES, FileChange, analyze_commits,
    analyze_commits_with, file_extension, find_large_commits, hourly_activity, major_changes,
};
pub use category::{CommitCategory, categorize};
pub use message::{MessageIssue, validate_commit_message};
pub use report::{
    format_hourly_activity, format_major_changes, format_message_issues, format_preview,
    format_stats, format_summary,
};
pub use work_area::{WorkArea, infer_work_areas};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analyzer::{CommitStats, analyze_commits};
    pub use crate::category::{CommitCategory, categorize};
    pub use crate::report::format_stats;
    pub use crate::work_area::{WorkArea, infer_work_areas};
}
