//! Image optimization checks: alt text coverage, image presence

use super::{AuditRule, CategoryOutcome};
use crate::{Category, CategoryResult, IssueKind, PageAttributes};

const MAX_ALT_DEDUCTION: i32 = 40;
const ALT_DEDUCTION_PER_IMAGE: i32 = 10;

/// Rule scoring image optimization
pub struct ImagesRule;

impl ImagesRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImagesRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRule for ImagesRule {
    fn category(&self) -> Category {
        Category::Images
    }

    fn evaluate(&self, page: &PageAttributes) -> CategoryResult {
        let mut out = CategoryOutcome::new();

        if page.images > 0 {
            if page.images_without_alt > 0 {
                let deduction =
                    MAX_ALT_DEDUCTION.min(page.images_without_alt as i32 * ALT_DEDUCTION_PER_IMAGE);
                out.issue(
                    IssueKind::ImagesMissingAlt,
                    format!("{} images missing alt text", page.images_without_alt),
                    "Add descriptive alt text to all images",
                    deduction,
                );
            }
        } else {
            out.recommend("Consider adding relevant images to enhance content", 5);
        }

        out.finish()
    }
}
