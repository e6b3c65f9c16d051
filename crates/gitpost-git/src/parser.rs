// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Git log parsing utilities
//!
//! This module turns the text produced by
//! `git log --pretty=format:%H%x1f%s%x1f%an%x1f%ad --date=short --numstat`
//! into [`CommitRecord`] values. Each commit starts with a header line whose
//! four fields are separated by the ASCII unit separator (0x1F), which cannot
//! occur in subjects, author names or dates. Header lines are followed by
//! zero or more numstat lines of the form `<added>\t<deleted>\t<path>`.
//!
//! # Example
//!
//! ```
//! use gitpost_git::parser::parse_log;
//!
//! let raw = "abc1234\u{1f}fix: typo\u{1f}Dev\u{1f}2026-01-02\n1\t1\tREADME.md\n";
//! let commits = parse_log(raw, true);
//! assert_eq!(commits.len(), 1);
//! assert_eq!(commits[0].additions, 1);
//! ```

use crate::commit::CommitRecord;
use tracing::debug;

/// Separator between header fields (ASCII unit separator)
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Token git prints instead of line counts for binary files
pub const BINARY_PLACEHOLDER: &str = "-";

/// A single parsed numstat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumstatLine {
    /// Lines added (0 for binary files)
    pub added: u64,
    /// Lines deleted (0 for binary files)
    pub deleted: u64,
    /// Path as printed by git
    pub path: String,
    /// Whether either count was the binary placeholder
    pub binary: bool,
}

/// Parse one `<added> <deleted> <path>` line
///
/// Returns `None` for lines that do not have three whitespace-separated
/// tokens or whose counts are neither decimal integers nor `-`.
#[must_use]
pub fn parse_numstat_line(line: &str) -> Option<NumstatLine> {
    let line = line.trim();
    let (added, rest) = line.split_once(char::is_whitespace)?;
    let (deleted, path) = rest.trim_start().split_once(char::is_whitespace)?;
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let added = parse_count(added)?;
    let deleted = parse_count(deleted)?;

    Some(NumstatLine {
        added: added.unwrap_or(0),
        deleted: deleted.unwrap_or(0),
        path: path.to_string(),
        binary: added.is_none() || deleted.is_none(),
    })
}

/// `Some(None)` for the binary placeholder, `Some(Some(n))` for a count
fn parse_count(token: &str) -> Option<Option<u64>> {
    if token == BINARY_PLACEHOLDER {
        return Some(None);
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().map(Some)
}

/// Parse a header line into a commit with zeroed counters
fn parse_header(line: &str) -> Option<CommitRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    let [hash, message, author, date] = fields.as_slice() else {
        return None;
    };
    if hash.is_empty() {
        return None;
    }
    Some(CommitRecord::new(*hash, *message, *author, *date))
}

/// Parse complete `git log` output
///
/// Whitespace-only input yields an empty list. Malformed lines are skipped
/// without affecting the totals already accumulated for a commit.
#[must_use]
pub fn parse_log(raw: &str, include_files: bool) -> Vec<CommitRecord> {
    let mut parser = StreamingLogParser::new(include_files);
    let mut commits = Vec::new();

    for line in raw.lines() {
        if let Some(commit) = parser.process_line(line) {
            commits.push(commit);
        }
    }

    let skipped = parser.skipped_lines();
    commits.extend(parser.finish());

    if skipped > 0 {
        debug!(skipped, commits = commits.len(), "Skipped unparseable git log lines");
    }

    commits
}

// ============================================================================
// Streaming Parser for incremental parsing
// ============================================================================

/// A line-at-a-time parser for `git log --numstat` output
///
/// A commit is returned once the next header line closes it; call
/// [`StreamingLogParser::finish`] to flush the last one.
#[derive(Debug)]
pub struct StreamingLogParser {
    include_files: bool,
    current: Option<CommitRecord>,
    skipped_lines: usize,
}

impl StreamingLogParser {
    /// Create a new streaming parser
    ///
    /// With `include_files` every produced commit carries `Some(files)`,
    /// otherwise `files` stays `None`.
    #[must_use]
    pub fn new(include_files: bool) -> Self {
        Self {
            include_files,
            current: None,
            skipped_lines: 0,
        }
    }

    /// Process a single line of output
    ///
    /// Returns the previous commit when `line` is a header that closes it.
    pub fn process_line(&mut self, line: &str) -> Option<CommitRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line.contains(FIELD_SEPARATOR) {
            let finished = self.current.take();
            match parse_header(line) {
                Some(mut commit) => {
                    if self.include_files {
                        commit.files = Some(Vec::new());
                    }
                    self.current = Some(commit);
                }
                None => {
                    // Numstat lines up to the next valid header are dropped
                    debug!(line, "Skipping malformed commit header");
                    self.skipped_lines += 1;
                }
            }
            return finished;
        }

        let Some(commit) = self.current.as_mut() else {
            self.skipped_lines += 1;
            return None;
        };

        match parse_numstat_line(line) {
            Some(stat) => {
                commit.additions = commit.additions.saturating_add(stat.added);
                commit.deletions = commit.deletions.saturating_add(stat.deleted);
                if let Some(files) = commit.files.as_mut() {
                    files.push(stat.path);
                }
            }
            None => {
                debug!(line, hash = %commit.hash, "Skipping malformed numstat line");
                self.skipped_lines += 1;
            }
        }

        None
    }

    /// Number of lines ignored so far
    #[must_use]
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Flush the commit still being accumulated, if any
    #[must_use]
    pub fn finish(self) -> Option<CommitRecord> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn header(hash: &str, subject: &str, author: &str, date: &str) -> String {
        [hash, subject, author, date].join("\u{1f}")
    }

    #[test]
    fn test_parse_single_commit_with_numstat() {
        let raw = format!(
            "{}\n\n10\t2\tsrc/a.ts\n3\t0\tsrc/b.ts\n",
            header("aaa1111", "fix: null pointer", "Kim", "2024-01-01")
        );

        let commits = parse_log(&raw, true);
        assert_eq!(commits.len(), 1);
        let commit = &commits[0];
        assert_eq!(commit.hash, "aaa1111");
        assert_eq!(commit.message, "fix: null pointer");
        assert_eq!(commit.author, "Kim");
        assert_eq!(commit.date, "2024-01-01");
        assert_eq!(commit.additions, 13);
        assert_eq!(commit.deletions, 2);
        assert_eq!(
            commit.files,
            Some(vec!["src/a.ts".to_string(), "src/b.ts".to_string()])
        );
    }

    #[test]
    fn test_parse_multiple_commits_keeps_order() {
        let raw = format!(
            "{}\n1\t1\ta.rs\n\n{}\n2\t2\tb.rs\n\n{}\n",
            header("c3", "third", "A", "2024-01-03"),
            header("c2", "second", "B", "2024-01-02"),
            header("c1", "first", "A", "2024-01-01"),
        );

        let commits = parse_log(&raw, false);
        let hashes: Vec<_> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["c3", "c2", "c1"]);
        assert_eq!(commits[2].additions, 0);
    }

    #[test]
    fn test_last_commit_is_flushed_without_trailing_header() {
        let raw = format!(
            "{}\n5\t1\tx.md",
            header("abc", "docs: readme", "Lee", "2024-02-02")
        );
        let commits = parse_log(&raw, false);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].additions, 5);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse_log("", true).is_empty());
        assert!(parse_log("  \n\t\n\r\n", true).is_empty());
    }

    #[test]
    fn test_commit_without_numstat_has_zero_counts_and_empty_files() {
        let raw = format!(
            "{}\n{}\n1\t1\tf.txt\n",
            header("h2", "empty commit", "A", "2024-01-02"),
            header("h1", "with file", "A", "2024-01-01"),
        );
        let commits = parse_log(&raw, true);
        assert_eq!(commits[0].additions, 0);
        assert_eq!(commits[0].deletions, 0);
        assert_eq!(commits[0].files, Some(Vec::new()));
    }

    #[test]
    fn test_files_absent_when_not_requested() {
        let raw = format!("{}\n1\t1\tf.txt\n", header("h", "m", "A", "2024-01-01"));
        let commits = parse_log(&raw, false);
        assert_eq!(commits[0].files, None);
        assert_eq!(commits[0].additions, 1);
    }

    #[test]
    fn test_binary_file_contributes_zero() {
        let raw = format!(
            "{}\n-\t-\tlogo.png\n4\t1\tsrc/main.rs\n",
            header("h", "feat: logo", "A", "2024-01-01")
        );
        let commits = parse_log(&raw, true);
        assert_eq!(commits[0].additions, 4);
        assert_eq!(commits[0].deletions, 1);
        assert_eq!(
            commits[0].files,
            Some(vec!["logo.png".to_string(), "src/main.rs".to_string()])
        );
    }

    #[test]
    fn test_pipe_in_subject_does_not_break_fields() {
        let raw = format!(
            "{}\n",
            header("h", "feat: a | b | c", "Park | Jr", "2024-03-03")
        );
        let commits = parse_log(&raw, false);
        assert_eq!(commits[0].message, "feat: a | b | c");
        assert_eq!(commits[0].author, "Park | Jr");
        assert_eq!(commits[0].date, "2024-03-03");
    }

    #[test]
    fn test_malformed_numstat_lines_are_skipped() {
        let raw = format!(
            "{}\n3\t1\tok.rs\nnot a numstat line\n7\tx\tbad.rs\n2\t2\n1\t0\talso_ok.rs\n",
            header("h", "m", "A", "2024-01-01")
        );
        let mut parser = StreamingLogParser::new(true);
        let mut out = Vec::new();
        for line in raw.lines() {
            out.extend(parser.process_line(line));
        }
        assert_eq!(parser.skipped_lines(), 3);
        out.extend(parser.finish());

        assert_eq!(out[0].additions, 4);
        assert_eq!(out[0].deletions, 1);
        assert_eq!(
            out[0].files,
            Some(vec!["ok.rs".to_string(), "also_ok.rs".to_string()])
        );
    }

    #[test]
    fn test_numstat_before_first_header_is_ignored() {
        let raw = format!("9\t9\torphan.rs\n{}\n", header("h", "m", "A", "2024-01-01"));
        let commits = parse_log(&raw, true);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].additions, 0);
    }

    #[test]
    fn test_malformed_header_closes_previous_commit() {
        let raw = format!(
            "{}\n1\t0\ta.rs\nbroken\u{1f}header\n5\t5\tlost.rs\n{}\n2\t0\tb.rs\n",
            header("h2", "two", "A", "2024-01-02"),
            header("h1", "one", "A", "2024-01-01"),
        );
        let commits = parse_log(&raw, true);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].additions, 1);
        assert_eq!(commits[1].additions, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = format!(
            "{}\r\n3\t2\twin.cs\r\n",
            header("h", "m", "A", "2024-01-01")
        );
        let commits = parse_log(&raw, true);
        assert_eq!(commits[0].date, "2024-01-01");
        assert_eq!(commits[0].files, Some(vec!["win.cs".to_string()]));
    }

    #[test]
    fn test_parse_numstat_line_with_spaces_in_path() {
        let stat = parse_numstat_line("12\t3\tdocs/my notes.md").expect("valid line");
        assert_eq!(stat.added, 12);
        assert_eq!(stat.deleted, 3);
        assert_eq!(stat.path, "docs/my notes.md");
        assert!(!stat.binary);
    }

    #[test]
    fn test_parse_numstat_line_binary_one_side() {
        let stat = parse_numstat_line("-\t4\tdata.bin").expect("valid line");
        assert_eq!(stat.added, 0);
        assert_eq!(stat.deleted, 4);
        assert!(stat.binary);
    }

    #[test]
    fn test_parse_numstat_line_rejects_bad_shapes() {
        assert!(parse_numstat_line("").is_none());
        assert!(parse_numstat_line("1\t2").is_none());
        assert!(parse_numstat_line("a\t2\tpath").is_none());
        assert!(parse_numstat_line("+1\t2\tpath").is_none());
        assert!(parse_numstat_line("1\t-2\tpath").is_none());
    }

    #[test]
    fn test_streaming_parser_emits_on_next_header() {
        let mut parser = StreamingLogParser::new(false);
        assert!(
            parser
                .process_line(&header("h2", "two", "A", "2024-01-02"))
                .is_none()
        );
        assert!(parser.process_line("1\t1\tx").is_none());
        let done = parser
            .process_line(&header("h1", "one", "A", "2024-01-01"))
            .expect("previous commit closed");
        assert_eq!(done.hash, "h2");
        assert_eq!(done.total_changes(), 2);
        assert_eq!(parser.finish().map(|c| c.hash), Some("h1".to_string()));
    }

    #[test]
    fn test_huge_counts_saturate() {
        let raw = format!(
            "{}\n18446744073709551615\t0\ta.rs\n1\t0\tb.rs\n0\t18446744073709551615\tc.rs\n",
            header("h", "m", "A", "2024-01-01")
        );
        let commits = parse_log(&raw, true);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].additions, u64::MAX);
        assert_eq!(commits[0].deletions, u64::MAX);
        assert_eq!(commits[0].total_changes(), u64::MAX);
        assert_eq!(commits[0].file_count(), Some(3));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn count_token() -> impl Strategy<Value = (String, u64)> {
        prop_oneof![
            (0u64..10_000_000).prop_map(|n| (n.to_string(), n)),
            Just((BINARY_PLACEHOLDER.to_string(), 0)),
        ]
    }

    proptest! {
        /// Property: "a d path" contributes exactly a and d
        #[test]
        fn prop_numstat_line_contributes_counts(
            a in 0u64..10_000_000,
            d in 0u64..10_000_000,
            path in "[a-z][a-z0-9_/.]{0,30}",
        ) {
            let raw = format!("h\u{1f}m\u{1f}A\u{1f}2024-01-01\n{a}\t{d}\t{path}\n");
            let commits = parse_log(&raw, true);
            prop_assert_eq!(commits.len(), 1);
            prop_assert_eq!(commits[0].additions, a);
            prop_assert_eq!(commits[0].deletions, d);
            prop_assert_eq!(commits[0].files.clone(), Some(vec![path]));
        }

        /// Property: the binary placeholder counts as zero on either side
        #[test]
        fn prop_binary_placeholder_is_zero(
            (added_tok, added) in count_token(),
            (deleted_tok, deleted) in count_token(),
        ) {
            let stat = parse_numstat_line(&format!("{added_tok}\t{deleted_tok}\tf.bin"))
                .expect("valid line");
            prop_assert_eq!(stat.added, added);
            prop_assert_eq!(stat.deleted, deleted);
        }

        /// Property: whitespace-only input never yields commits
        #[test]
        fn prop_whitespace_input_is_empty(ws in "[ \t\r\n]{0,40}") {
            prop_assert!(parse_log(&ws, true).is_empty());
        }

        /// Property: one commit per valid header, in input order
        #[test]
        fn prop_one_commit_per_header(
            subjects in proptest::collection::vec("[^\u{1f}\r\n]{0,40}", 0..20),
        ) {
            let mut raw = String::new();
            for (i, subject) in subjects.iter().enumerate() {
                raw.push_str(&format!("h{i}\u{1f}{subject}\u{1f}A\u{1f}2024-01-01\n1\t0\tf{i}.rs\n"));
            }
            let commits = parse_log(&raw, false);
            prop_assert_eq!(commits.len(), subjects.len());
            for (i, commit) in commits.iter().enumerate() {
                prop_assert_eq!(&commit.hash, &format!("h{i}"));
                prop_assert_eq!(commit.additions, 1);
            }
        }

        /// Property: arbitrary input never panics
        #[test]
        fn prop_parse_never_panics(raw in ".{0,200}") {
            let _ = parse_log(&raw, true);
        }
    }
}
