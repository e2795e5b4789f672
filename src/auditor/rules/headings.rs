//! Heading structure checks: H1 presence, uniqueness, length; H2 presence

use super::{AuditRule, CategoryOutcome};
use crate::{Category, CategoryResult, IssueKind, PageAttributes};

const MIN_H1_CHARS: usize = 20;
const MAX_H1_CHARS: usize = 70;

/// Rule scoring the heading structure
pub struct HeadingsRule;

impl HeadingsRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeadingsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRule for HeadingsRule {
    fn category(&self) -> Category {
        Category::Headings
    }

    fn evaluate(&self, page: &PageAttributes) -> CategoryResult {
        let mut out = CategoryOutcome::new();

        match page.h1_tags.as_slice() {
            [] => out.issue(
                IssueKind::MissingH1,
                "Missing H1 tag",
                "Add exactly one H1 tag to define the main topic",
                40,
            ),
            [h1] => {
                let len = h1.chars().count();
                if len < MIN_H1_CHARS {
                    out.issue(
                        IssueKind::H1TooShort,
                        "H1 tag too short",
                        "Make H1 more descriptive (20-70 characters)",
                        15,
                    );
                } else if len > MAX_H1_CHARS {
                    out.issue(
                        IssueKind::H1TooLong,
                        "H1 tag too long",
                        "Shorten H1 to under 70 characters",
                        10,
                    );
                }
            }
            many => out.issue(
                IssueKind::MultipleH1,
                format!("Multiple H1 tags found ({})", many.len()),
                "Use only one H1 tag per page",
                30,
            ),
        }

        // H2 check runs regardless of H1 outcome. Deducted from the score
        // but reported as a recommendation only, not an issue.
        if page.h2_tags.is_empty() {
            out.recommend("Consider adding H2 tags to structure your content", 10);
        }

        out.finish()
    }
}
