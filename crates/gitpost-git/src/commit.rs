//! Commit record type

use serde::{Deserialize, Serialize};

/// One commit as reported by `git log --numstat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit hash
    pub hash: String,
    /// Subject line of the commit message
    pub message: String,
    /// Author display name
    pub author: String,
    /// Author date, `YYYY-MM-DD`
    pub date: String,
    /// Lines added across all files (binary files count as 0)
    pub additions: u64,
    /// Lines deleted across all files (binary files count as 0)
    pub deletions: u64,
    /// Touched paths, only present when file collection was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

impl CommitRecord {
    /// Create a record with no line changes
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            author: author.into(),
            date: date.into(),
            additions: 0,
            deletions: 0,
            files: None,
        }
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }

    /// Total changed lines (additions + deletions), saturating at `u64::MAX`
    #[must_use]
    pub fn total_changes(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }

    /// Number of touched files, `None` if files were not collected
    #[must_use]
    pub fn file_count(&self) -> Option<usize> {
        self.files.as_ref().map(Vec::len)
    }
}
