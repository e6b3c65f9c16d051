// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! gitpost-git: Git log extraction and parsing for gitpost
//!
//! This library crate runs `git log --numstat` against a repository and turns
//! the raw output into an ordered list of [`CommitRecord`] values
//! (newest first) for the statistics and prompt stages.
//!
//! # Example
//!
//! ```no_run
//! use gitpost_git::{LogQuery, collect_commits};
//!
//! # async fn run() -> Result<(), gitpost_git::GitError> {
//! let query = LogQuery::last_days(7).with_files();
//! let commits = collect_commits(".", &query).await?;
//!
//! for c in commits {
//!     println!("{} - {}", c.short_hash(), c.message);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod commit;
pub mod error;
pub mod extractor;
pub mod parser;

pub use commit::CommitRecord;
pub use error::GitError;
pub use extractor::{LogQuery, collect_commit_hours, collect_commits, extract_log};
pub use parser::{NumstatLine, StreamingLogParser, parse_log, parse_numstat_line};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::CommitRecord;
    pub use crate::error::GitError;
    pub use crate::extractor::{LogQuery, collect_commits};
    pub use crate::parser::parse_log;
}
