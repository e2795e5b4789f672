//! Link checks: internal and external link presence

use super::{AuditRule, CategoryOutcome};
use crate::{Category, CategoryResult, PageAttributes};

/// Rule scoring internal and external linking
pub struct LinksRule;

impl LinksRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinksRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRule for LinksRule {
    fn category(&self) -> Category {
        Category::Links
    }

    fn evaluate(&self, page: &PageAttributes) -> CategoryResult {
        let mut out = CategoryOutcome::new();

        // Independent checks; a page can lose both deductions
        if page.internal_links == 0 {
            out.recommend("Add internal links to improve site navigation", 15);
        }
        if page.external_links == 0 {
            out.recommend(
                "Consider adding relevant external links to authoritative sources",
                10,
            );
        }

        out.finish()
    }
}
