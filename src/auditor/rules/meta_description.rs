//! Meta description checks: presence and length

use super::{AuditRule, CategoryOutcome};
use crate::{Category, CategoryResult, IssueKind, PageAttributes};

const MIN_DESCRIPTION_CHARS: usize = 120;
const MAX_DESCRIPTION_CHARS: usize = 160;

/// Rule scoring the meta description
pub struct MetaDescriptionRule;

impl MetaDescriptionRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetaDescriptionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRule for MetaDescriptionRule {
    fn category(&self) -> Category {
        Category::MetaDescription
    }

    fn evaluate(&self, page: &PageAttributes) -> CategoryResult {
        let mut out = CategoryOutcome::new();

        let description = match page.meta_description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => description,
            None => {
                out.missing(
                    IssueKind::MissingMetaDescription,
                    "Missing meta description",
                    "Add a compelling meta description (150-160 characters)",
                );
                return out.finish();
            }
        };

        let len = description.chars().count();
        if len < MIN_DESCRIPTION_CHARS {
            out.issue(
                IssueKind::MetaDescriptionTooShort,
                format!("Meta description too short ({len} characters)"),
                "Expand meta description to 150-160 characters",
                30,
            );
        } else if len > MAX_DESCRIPTION_CHARS {
            out.issue(
                IssueKind::MetaDescriptionTooLong,
                format!("Meta description too long ({len} characters)"),
                "Shorten meta description to under 160 characters",
                20,
            );
        }

        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_description(description: Option<&str>) -> PageAttributes {
        PageAttributes {
            url: "https://example.com/".to_string(),
            meta_description: description.map(str::to_string),
            ..PageAttributes::default()
        }
    }

    #[test]
    fn missing_description_scores_zero() {
        let result = MetaDescriptionRule::new().evaluate(&page_with_description(None));
        assert_eq!(result.score, 0);
        assert_eq!(result.issues[0].kind, IssueKind::MissingMetaDescription);
        assert_eq!(result.issues[0].message, "Missing meta description");
    }

    #[test]
    fn empty_description_is_treated_as_missing() {
        let result = MetaDescriptionRule::new().evaluate(&page_with_description(Some("")));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn ideal_length_scores_100() {
        let description = "x".repeat(155);
        let result = MetaDescriptionRule::new().evaluate(&page_with_description(Some(&description)));
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn short_description_deducts_30() {
        let description = "x".repeat(119);
        let result = MetaDescriptionRule::new().evaluate(&page_with_description(Some(&description)));
        assert_eq!(result.score, 70);
        assert_eq!(result.issues[0].kind, IssueKind::MetaDescriptionTooShort);
        assert_eq!(
            result.issues[0].message,
            "Meta description too short (119 characters)"
        );
    }

    #[test]
    fn long_description_deducts_20() {
        let description = "x".repeat(161);
        let result = MetaDescriptionRule::new().evaluate(&page_with_description(Some(&description)));
        assert_eq!(result.score, 80);
        assert_eq!(result.issues[0].kind, IssueKind::MetaDescriptionTooLong);
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        for len in [120, 160] {
            let description = "x".repeat(len);
            let result =
                MetaDescriptionRule::new().evaluate(&page_with_description(Some(&description)));
            assert_eq!(result.score, 100, "length {len} should be accepted");
        }
    }
}
