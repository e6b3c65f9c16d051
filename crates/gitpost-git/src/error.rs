// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Error types for gitpost-git

use thiserror::Error;

/// Errors that can occur while extracting history from git
#[derive(Debug, Error)]
pub enum GitError {
    /// The target directory is missing or is not a git repository
    #[error("Not a git repository: {path}")]
    RepositoryNotFound {
        /// The path that was expected to hold a repository
        path: String,
    },

    /// The `git` executable could not be found
    #[error("git is not installed or not on PATH; install git and try again")]
    GitNotInstalled,

    /// `git log` did not finish within the allowed time
    #[error(
        "git log timed out after {seconds}s; the lookback window or repository is too large"
    )]
    Timeout {
        /// The timeout that elapsed, in seconds
        seconds: u64,
    },

    /// `git log` produced more output than the configured cap
    #[error("git log output exceeded {limit} bytes; narrow the lookback window or filters")]
    OutputTooLarge {
        /// The output cap in bytes
        limit: usize,
    },

    /// `git` exited unsuccessfully for any other reason
    #[error("git log failed ({status}): {stderr}")]
    CommandFailed {
        /// Exit status description
        status: String,
        /// Raw stderr of the git process
        stderr: String,
    },

    /// I/O error while talking to the git process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Stable machine-readable category for this error
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RepositoryNotFound { .. } => "not_a_repository",
            Self::GitNotInstalled => "git_not_found",
            Self::Timeout { .. } => "timeout",
            Self::OutputTooLarge { .. } => "output_too_large",
            Self::CommandFailed { .. } => "command_failed",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            GitError::RepositoryNotFound {
                path: "/tmp/x".to_string(),
            },
            GitError::GitNotInstalled,
            GitError::Timeout { seconds: 15 },
            GitError::OutputTooLarge { limit: 10 },
            GitError::CommandFailed {
                status: "exit status: 128".to_string(),
                stderr: "fatal".to_string(),
            },
            GitError::Io(std::io::Error::other("boom")),
        ];
        let mut codes: Vec<_> = errors.iter().map(GitError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_command_failed_carries_stderr() {
        let err = GitError::CommandFailed {
            status: "exit status: 128".to_string(),
            stderr: "fatal: bad revision 'nope'".to_string(),
        };
        assert!(err.to_string().contains("bad revision 'nope'"));
    }

    #[test]
    fn test_timeout_message_mentions_seconds() {
        let err = GitError::Timeout { seconds: 15 };
        assert!(err.to_string().contains("15s"));
    }
}
