//! Content length check

use super::{AuditRule, CategoryOutcome};
use crate::{Category, CategoryResult, IssueKind, PageAttributes};

const MIN_WORD_COUNT: usize = 300;
const RECOMMENDED_WORD_COUNT: usize = 500;

/// Rule scoring the page's text content
pub struct ContentRule;

impl ContentRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContentRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRule for ContentRule {
    fn category(&self) -> Category {
        Category::Content
    }

    fn evaluate(&self, page: &PageAttributes) -> CategoryResult {
        let mut out = CategoryOutcome::new();

        if page.word_count < MIN_WORD_COUNT {
            out.issue(
                IssueKind::LowWordCount,
                format!("Low word count ({} words)", page.word_count),
                "Add more content (aim for 300+ words minimum)",
                40,
            );
        } else if page.word_count < RECOMMENDED_WORD_COUNT {
            out.recommend("Consider expanding content to 500+ words for better SEO", 15);
        }

        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_words(word_count: usize) -> PageAttributes {
        PageAttributes {
            url: "https://example.com/".to_string(),
            word_count,
            ..PageAttributes::default()
        }
    }

    #[test]
    fn low_word_count_deducts_40() {
        let result = ContentRule::new().evaluate(&page_with_words(299));
        assert_eq!(result.score, 60);
        assert_eq!(result.issues[0].kind, IssueKind::LowWordCount);
        assert_eq!(result.issues[0].message, "Low word count (299 words)");
    }

    #[test]
    fn zero_words_still_deducts_40() {
        let result = ContentRule::new().evaluate(&page_with_words(0));
        assert_eq!(result.score, 60);
        assert_eq!(result.issues[0].message, "Low word count (0 words)");
    }

    #[test]
    fn thin_content_deducts_15_without_issue() {
        let result = ContentRule::new().evaluate(&page_with_words(400));
        assert_eq!(result.score, 85);
        assert!(result.issues.is_empty());
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn rich_content_scores_100() {
        let result = ContentRule::new().evaluate(&page_with_words(500));
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn boundary_300_is_recommendation_only() {
        let result = ContentRule::new().evaluate(&page_with_words(300));
        assert_eq!(result.score, 85);
        assert!(result.issues.is_empty());
    }
}
