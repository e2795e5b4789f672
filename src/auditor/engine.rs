//! Audit engine: runs the category rules over pages and aggregates batches

use super::rules::{
    AuditRule, ContentRule, HeadingsRule, ImagesRule, LinksRule, MetaDescriptionRule, TitleRule,
};
use super::scoring;
use crate::{
    BatchResult, BatchSummary, IssueCount, IssueKind, PageAttributes, PageAudit, SeoData,
};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// How many issue kinds the batch summary reports
const COMMON_ISSUE_LIMIT: usize = 5;

/// Engine running the six category rules over page attributes.
///
/// Auditing is a pure function of the input attributes: no I/O, no shared
/// state, so the same input always yields an identical audit.
pub struct PageAuditor {
    rules: Vec<Box<dyn AuditRule + Send + Sync>>,
}

impl PageAuditor {
    /// Create an auditor with the six rules in evaluation order: title,
    /// meta description, headings, content, images, links. This order fixes
    /// the issue and recommendation concatenation order in the output.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(TitleRule::new()),
                Box::new(MetaDescriptionRule::new()),
                Box::new(HeadingsRule::new()),
                Box::new(ContentRule::new()),
                Box::new(ImagesRule::new()),
                Box::new(LinksRule::new()),
            ],
        }
    }

    /// Audit a single page
    pub fn audit_page(&self, page: &PageAttributes) -> PageAudit {
        let mut scores = BTreeMap::new();
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for rule in &self.rules {
            let result = rule.evaluate(page);
            scores.insert(rule.category(), result.score);
            issues.extend(result.issues);
            recommendations.extend(result.recommendations);
        }

        let overall_score = scoring::overall_score(&scores);

        PageAudit {
            url: page.url.clone(),
            scores,
            issues,
            recommendations,
            overall_score,
            seo_data: SeoData {
                title: page.title.clone(),
                meta_description: page.meta_description.clone(),
                h1_tags: page.h1_tags.clone(),
                word_count: page.word_count,
                url: page.url.clone(),
            },
        }
    }

    /// Audit an ordered batch of pages sequentially
    pub fn audit_pages(&self, pages: &[PageAttributes]) -> BatchResult {
        let audits: Vec<PageAudit> = pages.iter().map(|p| self.audit_page(p)).collect();
        let summary = Self::summarize(&audits);
        BatchResult {
            pages: audits,
            summary,
        }
    }

    /// Audit a batch on the rayon pool. Page audits are independent, so this
    /// is a throughput optimization only: `pages` keeps input order and the
    /// summary is computed from the complete ordered result set, making the
    /// output identical to [`PageAuditor::audit_pages`].
    pub fn audit_pages_parallel(&self, pages: &[PageAttributes]) -> BatchResult {
        let audits: Vec<PageAudit> = pages.par_iter().map(|p| self.audit_page(p)).collect();
        let summary = Self::summarize(&audits);
        BatchResult {
            pages: audits,
            summary,
        }
    }

    /// Reduce per-page audits into the batch summary
    pub fn summarize(audits: &[PageAudit]) -> BatchSummary {
        let total_pages = audits.len();

        let average_score = if audits.is_empty() {
            0.0
        } else {
            let total: f64 = audits.iter().map(|a| a.overall_score).sum();
            scoring::round1(total / audits.len() as f64)
        };

        // Count issue kinds in encounter order (page order, then per-page
        // category order) so ties keep first-seen precedence.
        let mut counts: Vec<(IssueKind, usize)> = Vec::new();
        let mut total_issues = 0;
        for audit in audits {
            for issue in &audit.issues {
                total_issues += 1;
                match counts.iter_mut().find(|(kind, _)| *kind == issue.kind) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((issue.kind, 1)),
                }
            }
        }

        // Stable sort: equal counts stay in first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(COMMON_ISSUE_LIMIT);

        BatchSummary {
            total_pages,
            average_score,
            common_issues: counts
                .into_iter()
                .map(|(kind, count)| IssueCount { kind, count })
                .collect(),
            total_issues,
        }
    }
}

impl Default for PageAuditor {
    fn default() -> Self {
        Self::new()
    }
}
