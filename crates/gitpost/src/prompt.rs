// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Prompt construction
//!
//! Turns a batch of commits and their statistics into a Korean instruction
//! prompt for a generative-text model. Nothing here talks to the network;
//! the caller decides where the prompt goes.

use crate::context::GenerationContext;
use gitpost_git::CommitRecord;
use gitpost_stats::{CommitStats, format_stats, infer_work_areas};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Number of subjects listed by the quick template
pub const QUICK_SUBJECT_LIMIT: usize = 5;

const DETAILED_PERSONA: &str = "당신은 기술 블로그 작성 전문가입니다. 아래 Git 커밋 내역을 분석해서 **Velog 스타일의 기술 블로그 글**을 작성해주세요.";

const QUICK_PERSONA: &str = "다음 Git 커밋을 3-5문장으로 요약해주세요:";

const DETAILED_GUIDE: &str = "\
## ✍️ 작성 가이드라인

1. **제목**: 이번 주 작업한 내용을 한 문장으로 요약 (이모지 포함)
2. **서론**: 이번 주 무엇을 했는지 간단히 소개
3. **본문**:
   - 주요 작업 내용을 섹션별로 정리
   - 커밋 메시지를 바탕으로 기술적인 내용 설명
   - 어려웠던 점과 해결 방법 (추측 가능한 경우)
4. **결론**: 배운 점, 느낀 점
5. **다음 계획**: 앞으로 할 작업 간단히 언급

## 📝 스타일 요구사항

- Velog의 자연스럽고 친근한 어투 사용
- 적절한 이모지 활용 (과하지 않게)
- Markdown 문법 사용
- 코드 블록은 ```언어명 형식 사용
- 읽기 쉽게 단락 구분

**중요**: 제목부터 본문까지 완전한 블로그 글을 작성해주세요. 메타 설명이나 주석은 제외하고 바로 블로그 글 내용만 작성해주세요.
";

const QUICK_GUIDE: &str = "친근한 말투 (~했어요)로 작성하고, 기술적 핵심만 간단히 언급해주세요.\n";

/// Shape of the generated prompt
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PromptTemplate {
    /// Full blog post with structure and style guidance
    #[default]
    Detailed,
    /// Three to five sentence summary
    Quick,
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detailed => f.write_str("detailed"),
            Self::Quick => f.write_str("quick"),
        }
    }
}

/// `(oldest, newest)` dates of a reverse-chronological batch
#[must_use]
pub fn work_period(commits: &[CommitRecord]) -> Option<(&str, &str)> {
    let newest = commits.first()?;
    let oldest = commits.last()?;
    Some((oldest.date.as_str(), newest.date.as_str()))
}

/// One line per commit: `N. [short] subject (+a -d)`
#[must_use]
pub fn commit_list(commits: &[CommitRecord]) -> String {
    let mut out = String::new();
    for (i, commit) in commits.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{}] {} (+{} -{})",
            i + 1,
            commit.short_hash(),
            commit.message,
            commit.additions,
            commit.deletions
        );
    }
    out
}

fn area_labels(commits: &[CommitRecord]) -> String {
    infer_work_areas(commits)
        .into_iter()
        .map(|area| area.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn file_type_summary(stats: &CommitStats) -> String {
    let mut entries: Vec<_> = stats.file_types.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .map(|(ext, count)| format!("{ext}: {count}개"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the prompt for `commits`
///
/// `commits` must be newest first, as returned by the extractor. A custom
/// prompt in the context replaces the opening persona line; everything else
/// in the template stays.
#[must_use]
pub fn build_prompt(
    commits: &[CommitRecord],
    stats: &CommitStats,
    ctx: &GenerationContext,
) -> String {
    let mut out = match ctx.template {
        PromptTemplate::Detailed => detailed(commits, stats, ctx),
        PromptTemplate::Quick => quick(commits, ctx),
    };

    if ctx.include_stats {
        out.push_str("\n---\n\n");
        out.push_str(&format_stats(stats));
    }
    out
}

fn detailed(commits: &[CommitRecord], stats: &CommitStats, ctx: &GenerationContext) -> String {
    let mut out = String::new();
    out.push_str(ctx.custom_prompt().unwrap_or(DETAILED_PERSONA));
    out.push_str("\n\n## 📊 커밋 분석 데이터\n\n**기본 정보**:\n");

    let _ = writeln!(out, "- 커밋 수: {}개", commits.len());
    let _ = writeln!(out, "- 파일 변경: {}개", stats.files_changed());
    let _ = writeln!(
        out,
        "- 추가: {}줄, 삭제: {}줄",
        stats.total_additions, stats.total_deletions
    );
    if let Some((oldest, newest)) = work_period(commits) {
        let _ = writeln!(out, "- 작업 기간: {oldest} ~ {newest}");
    }
    let _ = writeln!(out, "- 작업 카테고리: {}", area_labels(commits));
    if !stats.file_types.is_empty() {
        let _ = writeln!(out, "- 파일 타입: {}", file_type_summary(stats));
    }

    out.push_str("\n**커밋 내역**:\n");
    out.push_str(&commit_list(commits));

    if !ctx.example_urls.is_empty() {
        out.push_str("\n## 🔗 참고할 글\n\n아래 글의 문체와 구성을 참고해주세요:\n");
        for url in &ctx.example_urls {
            let _ = writeln!(out, "- {url}");
        }
    }

    out.push_str("\n---\n\n");
    out.push_str(DETAILED_GUIDE);
    out
}

fn quick(commits: &[CommitRecord], ctx: &GenerationContext) -> String {
    let mut out = String::new();
    out.push_str(ctx.custom_prompt().unwrap_or(QUICK_PERSONA));
    out.push_str("\n\n");

    let _ = writeln!(out, "커밋 수: {}개", commits.len());
    let _ = writeln!(out, "카테고리: {}", area_labels(commits));
    out.push_str("주요 메시지:\n");
    for (i, commit) in commits.iter().take(QUICK_SUBJECT_LIMIT).enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, commit.message);
    }

    out.push('\n');
    out.push_str(QUICK_GUIDE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitpost_stats::analyze_commits;
    use similar_asserts::assert_eq;

    fn sample() -> Vec<CommitRecord> {
        let mut newest = CommitRecord::new("bbb2222ffff", "feat: add export", "Kim", "2024-01-02");
        newest.additions = 300;
        newest.files = Some(vec!["b.ts".to_string()]);
        let mut oldest = CommitRecord::new("aaa1111ffff", "fix: null pointer", "Kim", "2024-01-01");
        oldest.additions = 10;
        oldest.deletions = 2;
        oldest.files = Some(vec!["a.ts".to_string()]);
        vec![newest, oldest]
    }

    fn context() -> GenerationContext {
        GenerationContext {
            include_stats: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_commit_list_format() {
        assert_eq!(
            commit_list(&sample()),
            "1. [bbb2222] feat: add export (+300 -0)\n2. [aaa1111] fix: null pointer (+10 -2)\n"
        );
    }

    #[test]
    fn test_work_period_oldest_first() {
        assert_eq!(work_period(&sample()), Some(("2024-01-01", "2024-01-02")));
        assert_eq!(work_period(&[]), None);
    }

    #[test]
    fn test_detailed_prompt_sections() {
        let commits = sample();
        let prompt = build_prompt(&commits, &analyze_commits(&commits), &context());

        assert!(prompt.starts_with(DETAILED_PERSONA));
        assert!(prompt.contains("- 커밋 수: 2개"));
        assert!(prompt.contains("- 파일 변경: 2개"));
        assert!(prompt.contains("- 추가: 310줄, 삭제: 2줄"));
        assert!(prompt.contains("- 작업 기간: 2024-01-01 ~ 2024-01-02"));
        assert!(prompt.contains("- 작업 카테고리: 기능 추가, 버그 수정"));
        assert!(prompt.contains("- 파일 타입: ts: 2개"));
        assert!(prompt.contains("1. [bbb2222] feat: add export (+300 -0)"));
        assert!(prompt.contains("## ✍️ 작성 가이드라인"));
        assert!(!prompt.contains("참고할 글"));
        assert!(!prompt.contains("## 📊 커밋 통계"));
    }

    #[test]
    fn test_custom_prompt_replaces_persona() {
        let commits = sample();
        let ctx = GenerationContext {
            custom_prompt: Some("주니어 개발자용으로 써주세요.".to_string()),
            ..context()
        };
        let prompt = build_prompt(&commits, &analyze_commits(&commits), &ctx);
        assert!(prompt.starts_with("주니어 개발자용으로 써주세요.\n\n## 📊"));
        assert!(!prompt.contains(DETAILED_PERSONA));
    }

    #[test]
    fn test_blank_custom_prompt_is_ignored() {
        let commits = sample();
        let ctx = GenerationContext {
            custom_prompt: Some("   ".to_string()),
            ..context()
        };
        let prompt = build_prompt(&commits, &analyze_commits(&commits), &ctx);
        assert!(prompt.starts_with(DETAILED_PERSONA));
    }

    #[test]
    fn test_example_urls_listed() {
        let commits = sample();
        let ctx = GenerationContext {
            example_urls: vec![
                "https://velog.io/@a/post-1".to_string(),
                "https://velog.io/@b/post-2".to_string(),
            ],
            ..context()
        };
        let prompt = build_prompt(&commits, &analyze_commits(&commits), &ctx);
        assert!(prompt.contains("- https://velog.io/@a/post-1\n- https://velog.io/@b/post-2\n"));
    }

    #[test]
    fn test_stats_appended_when_requested() {
        let commits = sample();
        let stats = analyze_commits(&commits);
        let ctx = GenerationContext {
            include_stats: true,
            ..context()
        };
        let prompt = build_prompt(&commits, &stats, &ctx);
        assert!(prompt.ends_with(&format_stats(&stats)));
        assert!(prompt.contains("**총 커밋 수**: 2개"));
    }

    #[test]
    fn test_quick_template_limits_subjects() {
        let commits: Vec<_> = (0..8)
            .map(|i| CommitRecord::new(format!("h{i}"), format!("wip {i}"), "Kim", "2024-01-01"))
            .collect();
        let ctx = GenerationContext {
            template: PromptTemplate::Quick,
            ..context()
        };
        let prompt = build_prompt(&commits, &analyze_commits(&commits), &ctx);

        assert!(prompt.starts_with(QUICK_PERSONA));
        assert!(prompt.contains("커밋 수: 8개"));
        assert!(prompt.contains("5. wip 4\n"));
        assert!(!prompt.contains("6. wip 5"));
        assert!(prompt.ends_with(QUICK_GUIDE));
    }

    #[test]
    fn test_empty_batch_has_no_period() {
        let prompt = build_prompt(&[], &CommitStats::default(), &context());
        assert!(prompt.contains("- 커밋 수: 0개"));
        assert!(!prompt.contains("작업 기간"));
        assert!(prompt.contains("- 작업 카테고리: 개발"));
    }

    #[test]
    fn test_template_display() {
        assert_eq!(PromptTemplate::Detailed.to_string(), "detailed");
        assert_eq!(PromptTemplate::Quick.to_string(), "quick");
    }
}
