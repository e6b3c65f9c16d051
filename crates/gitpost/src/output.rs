// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Markdown file output

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default filename prefix for saved posts
pub const DEFAULT_PREFIX: &str = "blog-post";

/// Placed between an existing post and appended content
pub const APPEND_SEPARATOR: &str = "\n\n---\n\n";

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Write `content` to `path`, creating parent directories as needed
///
/// Relative paths are resolved against the current directory. Returns the
/// absolute path that was written.
///
/// # Errors
///
/// Returns any I/O error from resolving the path, creating directories or
/// writing the file.
pub fn save_markdown(path: impl AsRef<Path>, content: &str) -> io::Result<PathBuf> {
    let full = absolute(path.as_ref())?;

    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&full, content)?;

    debug!(path = %full.display(), bytes = content.len(), "Saved markdown");
    Ok(full)
}

/// Add `content` to the end of an existing post after [`APPEND_SEPARATOR`]
///
/// Returns the absolute path that was written.
///
/// # Errors
///
/// Returns [`io::ErrorKind::NotFound`] if the file does not exist, or any
/// other I/O error from reading or writing it.
pub fn append_markdown(path: impl AsRef<Path>, content: &str) -> io::Result<PathBuf> {
    let full = absolute(path.as_ref())?;
    let mut combined = std::fs::read_to_string(&full)?;
    combined.push_str(APPEND_SEPARATOR);
    combined.push_str(content);
    std::fs::write(&full, &combined)?;

    debug!(path = %full.display(), bytes = content.len(), "Appended markdown");
    Ok(full)
}

/// `<prefix>-YYYY-MM-DD.md`
#[must_use]
pub fn date_based_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.md", date.format("%Y-%m-%d"))
}

/// Prepend Velog front matter (tags, visibility, timestamp)
#[must_use]
pub fn with_front_matter(
    content: &str,
    tags: &[String],
    private: bool,
    timestamp: DateTime<Utc>,
) -> String {
    format!(
        "---\ntags: {}\npublished: {}\ndate: {}\n---\n{content}",
        tags.join(", "),
        !private,
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().join("posts/2024/week.md");

        let written = save_markdown(&target, "# Hello\n").expect("save");
        assert_eq!(written, target);
        assert_eq!(std::fs::read_to_string(&target).expect("read"), "# Hello\n");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().join("post.md");
        save_markdown(&target, "old").expect("save");
        save_markdown(&target, "new").expect("save");
        assert_eq!(std::fs::read_to_string(&target).expect("read"), "new");
    }

    #[test]
    fn test_append_adds_separator() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().join("post.md");
        std::fs::write(&target, "# Week 1\n").expect("write");

        let written = append_markdown(&target, "# Week 2\n").expect("append");
        assert_eq!(written, target);
        assert_eq!(
            std::fs::read_to_string(&target).expect("read"),
            "# Week 1\n\n\n---\n\n# Week 2\n"
        );
    }

    #[test]
    fn test_append_requires_existing_file() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().join("missing.md");

        let err = append_markdown(&target, "x").expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!target.exists());
    }

    #[test]
    fn test_date_based_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert_eq!(date_based_filename(DEFAULT_PREFIX, date), "blog-post-2024-03-09.md");
        assert_eq!(date_based_filename("til", date), "til-2024-03-09.md");
    }

    #[test]
    fn test_front_matter() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid time");
        let tags = vec!["rust".to_string(), "git".to_string()];

        assert_eq!(
            with_front_matter("# Post\n", &tags, false, ts),
            "---\ntags: rust, git\npublished: true\ndate: 2024-01-02T03:04:05.000Z\n---\n# Post\n"
        );
        assert!(with_front_matter("", &[], true, ts).contains("published: false\n"));
    }
}
