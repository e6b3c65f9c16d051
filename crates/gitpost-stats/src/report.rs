// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Markdown rendering of commit statistics
//!
//! Sections whose backing map is empty are left out entirely.

use crate::analyzer::{CommitStats, FileChange};
use crate::message::validate_commit_message;
use crate::work_area::WorkArea;
use gitpost_git::CommitRecord;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

/// Maximum number of file extensions listed
pub const TOP_FILE_TYPES: usize = 10;

/// Maximum number of large commits listed
pub const TOP_LARGE_COMMITS: usize = 5;

/// Longest bar drawn in the per-day and per-hour histograms
pub const MAX_BAR_WIDTH: usize = 20;

/// Characters of a commit subject shown in the large-commit list
pub const MESSAGE_PREVIEW_CHARS: usize = 50;

const BAR_GLYPH: char = '█';

fn bar(count: usize) -> String {
    std::iter::repeat_n(BAR_GLYPH, count.min(MAX_BAR_WIDTH)).collect()
}

/// Map entries sorted by count, highest first; ties keep key order
fn by_count_desc<K>(map: &BTreeMap<K, usize>) -> Vec<(&K, usize)> {
    let mut entries: Vec<_> = map.iter().map(|(k, v)| (k, *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Render statistics as a Markdown report
#[must_use]
pub fn format_stats(stats: &CommitStats) -> String {
    let mut out = String::from("## 📊 커밋 통계\n\n");

    let _ = writeln!(out, "**총 커밋 수**: {}개", stats.total_commits);
    let _ = writeln!(
        out,
        "**변경 사항**: +{} -{}\n",
        stats.total_additions, stats.total_deletions
    );

    if !stats.authors.is_empty() {
        out.push_str("### 👥 작성자별 커밋\n");
        for (author, count) in by_count_desc(&stats.authors) {
            let _ = writeln!(
                out,
                "- **{author}**: {count}개 ({:.1}%)",
                stats.percentage(count)
            );
        }
        out.push('\n');
    }

    if !stats.file_types.is_empty() {
        out.push_str("### 📁 파일 타입별 변경\n");
        for (ext, count) in by_count_desc(&stats.file_types)
            .into_iter()
            .take(TOP_FILE_TYPES)
        {
            let _ = writeln!(out, "- `.{ext}`: {count}개 파일");
        }
        out.push('\n');
    }

    if !stats.commits_by_day.is_empty() {
        out.push_str("### 📅 일별 활동\n");
        for (date, count) in &stats.commits_by_day {
            let _ = writeln!(out, "- {date}: {} ({count})", bar(*count));
        }
        out.push('\n');
    }

    if !stats.commit_categories.is_empty() {
        out.push_str("### 🏷️ 커밋 카테고리\n");
        for (category, count) in by_count_desc(&stats.commit_categories) {
            let _ = writeln!(
                out,
                "- {} **{category}**: {count}개 ({:.1}%)",
                category.emoji(),
                stats.percentage(count)
            );
        }
        out.push('\n');
    }

    if stats.avg_commit_size > 0 {
        out.push_str("### 📏 평균 커밋 크기\n");
        let _ = writeln!(out, "**{}**줄 변경/커밋\n", stats.avg_commit_size);
    }

    if !stats.large_commits.is_empty() {
        out.push_str("### ⚠️ 리뷰 필요 (큰 커밋)\n");
        for commit in stats.large_commits.iter().take(TOP_LARGE_COMMITS) {
            let _ = writeln!(
                out,
                "- `{}` {} (+{}/-{} = {}줄)",
                commit.short_hash(),
                truncate_chars(&commit.message, MESSAGE_PREVIEW_CHARS),
                commit.additions,
                commit.deletions,
                commit.total_changes()
            );
        }
        out.push('\n');
    }

    out
}

/// Per-hour histogram section; empty when there is no activity
#[must_use]
pub fn format_hourly_activity(hours: &BTreeMap<u32, usize>) -> String {
    if hours.is_empty() {
        return String::new();
    }
    let mut out = String::from("### 🕐 시간대별 활동
");
    for (hour, count) in hours {
        let _ = writeln!(out, "- {hour:02}시: {} ({count})", bar(*count));
    }
    out.push('\n');
    out
}

/// Most-changed files section; empty when no files were collected
#[must_use]
pub fn format_major_changes(changes: &[FileChange]) -> String {
    if changes.is_empty() {
        return String::new();
    }
    let mut out = String::from("### 🔥 주요 변경 파일
");
    for change in changes {
        let _ = writeln!(
            out,
            "- `{}`: {}줄 ({}개 커밋)",
            change.path,
            change.changes,
            change.commits.len()
        );
    }
    out.push('\n');
    out
}

/// Commits whose subjects fail [`validate_commit_message`]
///
/// Empty when every subject is fine.
#[must_use]
pub fn format_message_issues(commits: &[CommitRecord]) -> String {
    let mut out = String::new();
    for commit in commits {
        let issues = validate_commit_message(&commit.message);
        if issues.is_empty() {
            continue;
        }
        if out.is_empty() {
            out.push_str("### ✏️ 커밋 메시지 점검
");
        }
        let descriptions: Vec<&str> = issues.iter().map(|i| i.description()).collect();
        let _ = writeln!(
            out,
            "- `{}` {}",
            commit.short_hash(),
            descriptions.join(" ")
        );
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Short plain-text summary used by the preview and prompt stages
#[must_use]
pub fn format_summary(stats: &CommitStats, areas: &BTreeSet<WorkArea>) -> String {
    let labels: Vec<&str> = areas.iter().map(|a| a.label()).collect();
    let mut out = String::from("📊 통계:\n");
    let _ = writeln!(out, "  - 파일 변경: {}개", stats.files_changed());
    let _ = writeln!(
        out,
        "  - 추가: {}줄, 삭제: {}줄",
        stats.total_additions, stats.total_deletions
    );
    let _ = writeln!(out, "  - 카테고리: {}", labels.join(", "));
    out
}

/// Numbered list of commits for a quick look before generating anything
#[must_use]
pub fn format_preview(commits: &[CommitRecord], days: u32) -> String {
    if commits.is_empty() {
        return format!("최근 {days}일간 커밋이 없어요\n");
    }

    let mut out = format!("📝 최근 {days}일간 {}개 커밋:\n\n", commits.len());
    for (i, commit) in commits.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", i + 1, commit.short_hash(), commit.message);
        let _ = writeln!(out, "   {} · {}", commit.author, commit.date);
        if let Some(files) = commit.files.as_deref().filter(|f| !f.is_empty()) {
            let _ = writeln!(out, "   파일: {}", files.join(", "));
        }
        out.push('\n');
    }
    out
}
