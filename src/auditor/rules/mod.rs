//! Per-category audit rules

pub mod content;
pub mod headings;
pub mod images;
pub mod links;
pub mod meta_description;
pub mod title;

pub use content::ContentRule;
pub use headings::HeadingsRule;
pub use images::ImagesRule;
pub use links::LinksRule;
pub use meta_description::MetaDescriptionRule;
pub use title::TitleRule;

use crate::{Category, CategoryResult, Issue, IssueKind, PageAttributes};

/// Trait for category audit rules
pub trait AuditRule {
    /// Category this rule scores
    fn category(&self) -> Category;

    /// Evaluate one page's attributes for this category
    fn evaluate(&self, page: &PageAttributes) -> CategoryResult;
}

/// Accumulator for a category's checks.
///
/// Starts at 100; each check records an issue or a recommendation together
/// with its deduction. The raw score may go negative mid-evaluation and is
/// clamped once in [`CategoryOutcome::finish`], so individual rules never
/// repeat the clamping boilerplate.
pub struct CategoryOutcome {
    score: i32,
    issues: Vec<Issue>,
    recommendations: Vec<String>,
}

impl CategoryOutcome {
    pub fn new() -> Self {
        Self {
            score: 100,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Record an issue with a matching recommendation and deduct points
    pub fn issue(
        &mut self,
        kind: IssueKind,
        message: impl Into<String>,
        recommendation: impl Into<String>,
        deduction: i32,
    ) {
        self.issues.push(Issue::new(kind, message));
        self.recommendations.push(recommendation.into());
        self.score -= deduction;
    }

    /// Record a recommendation-only check (deducted from the score but not
    /// counted as an issue)
    pub fn recommend(&mut self, recommendation: impl Into<String>, deduction: i32) {
        self.recommendations.push(recommendation.into());
        self.score -= deduction;
    }

    /// A required attribute is missing entirely: score drops to 0
    pub fn missing(
        &mut self,
        kind: IssueKind,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) {
        self.issues.push(Issue::new(kind, message));
        self.recommendations.push(recommendation.into());
        self.score = 0;
    }

    /// Clamp the raw score into [0, 100] and produce the category result
    pub fn finish(self) -> CategoryResult {
        CategoryResult {
            score: self.score.clamp(0, 100) as u8,
            issues: self.issues,
            recommendations: self.recommendations,
        }
    }
}

impl Default for CategoryOutcome {
    fn default() -> Self {
        Self::new()
    }
}
