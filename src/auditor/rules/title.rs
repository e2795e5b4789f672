//! Title tag checks: presence, length, duplicate words

use super::{AuditRule, CategoryOutcome};
use crate::{Category, CategoryResult, IssueKind, PageAttributes};
use std::collections::HashSet;

const MIN_TITLE_CHARS: usize = 30;
const MAX_TITLE_CHARS: usize = 60;

/// Rule scoring the page title
pub struct TitleRule;

impl TitleRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TitleRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRule for TitleRule {
    fn category(&self) -> Category {
        Category::Title
    }

    fn evaluate(&self, page: &PageAttributes) -> CategoryResult {
        let mut out = CategoryOutcome::new();

        let title = match page.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => title,
            None => {
                out.missing(
                    IssueKind::MissingTitle,
                    "Missing title tag",
                    "Add a descriptive title tag (50-60 characters)",
                );
                return out.finish();
            }
        };

        let len = title.chars().count();
        if len < MIN_TITLE_CHARS {
            out.issue(
                IssueKind::TitleTooShort,
                format!("Title too short ({len} characters)"),
                "Expand title to 50-60 characters for better SEO",
                30,
            );
        } else if len > MAX_TITLE_CHARS {
            out.issue(
                IssueKind::TitleTooLong,
                format!("Title too long ({len} characters)"),
                "Shorten title to under 60 characters to avoid truncation",
                20,
            );
        }

        // Duplicate-word check is independent of length
        let words: Vec<String> = title
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let distinct: HashSet<&String> = words.iter().collect();
        if words.len() != distinct.len() {
            out.issue(
                IssueKind::TitleDuplicateWords,
                "Title contains duplicate words",
                "Remove duplicate words from title",
                10,
            );
        }

        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_title(title: Option<&str>) -> PageAttributes {
        PageAttributes {
            url: "https://example.com/".to_string(),
            title: title.map(str::to_string),
            ..PageAttributes::default()
        }
    }

    #[test]
    fn missing_title_scores_zero() {
        let result = TitleRule::new().evaluate(&page_with_title(None));
        assert_eq!(result.score, 0);
        assert_eq!(result.issues[0].kind, IssueKind::MissingTitle);
        assert_eq!(result.issues[0].message, "Missing title tag");
    }

    #[test]
    fn empty_title_is_treated_as_missing() {
        let result = TitleRule::new().evaluate(&page_with_title(Some("")));
        assert_eq!(result.score, 0);
        assert_eq!(result.issues[0].kind, IssueKind::MissingTitle);
    }

    #[test]
    fn good_title_scores_100() {
        // 45 characters, all words distinct
        let title = "Complete Guide to Growing Tomatoes at Home!!!";
        assert_eq!(title.chars().count(), 45);
        let result = TitleRule::new().evaluate(&page_with_title(Some(title)));
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn short_title_deducts_30() {
        let result = TitleRule::new().evaluate(&page_with_title(Some("Short title here")));
        assert_eq!(result.score, 70);
        assert_eq!(result.issues[0].kind, IssueKind::TitleTooShort);
        assert_eq!(result.issues[0].message, "Title too short (16 characters)");
    }

    #[test]
    fn long_title_deducts_20() {
        let title = "a".repeat(61);
        let result = TitleRule::new().evaluate(&page_with_title(Some(&title)));
        assert_eq!(result.score, 80);
        assert_eq!(result.issues[0].kind, IssueKind::TitleTooLong);
        assert_eq!(result.issues[0].message, "Title too long (61 characters)");
    }

    #[test]
    fn duplicate_words_deduct_10() {
        // "seo seo tips" is short AND has duplicates; isolate the duplicate
        // check with a long-enough title first
        let title = "Best seo tips and tricks for best seo results";
        let result = TitleRule::new().evaluate(&page_with_title(Some(title)));
        assert_eq!(result.score, 90);
        assert_eq!(result.issues[0].kind, IssueKind::TitleDuplicateWords);
    }

    #[test]
    fn duplicate_check_is_case_insensitive() {
        let title = "Tomatoes and more tomatoes from your own garden";
        let result = TitleRule::new().evaluate(&page_with_title(Some(title)));
        assert!(result
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::TitleDuplicateWords));
    }

    #[test]
    fn short_and_duplicated_title_stacks_deductions() {
        let result = TitleRule::new().evaluate(&page_with_title(Some("seo seo tips")));
        // 100 - 30 (short) - 10 (duplicates) = 60
        assert_eq!(result.score, 60);
        assert_eq!(result.issues.len(), 2);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 31 chars but more than 60 bytes
        let title = "ééééééééééééééééééééééééééééééé";
        assert_eq!(title.chars().count(), 31);
        let result = TitleRule::new().evaluate(&page_with_title(Some(title)));
        assert!(result
            .issues
            .iter()
            .all(|i| i.kind != IssueKind::TitleTooShort && i.kind != IssueKind::TitleTooLong));
    }
}
