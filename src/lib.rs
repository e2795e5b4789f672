//! Sitegrade: on-page SEO auditor
//!
//! This library scores crawled pages against fixed on-page SEO heuristics
//! and aggregates per-page audits into a site-level report. The audit engine
//! itself is a pure transformation over in-memory page attributes; crawling,
//! AI suggestions, and rank checking live in their own modules.

pub mod auditor;
pub mod config;
pub mod crawler;
pub mod keywords;
pub mod rank;
pub mod reporter;
pub mod suggestions;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes extracted from one fetched page. Input to the auditor.
///
/// Missing or empty optional fields are scored as "missing", never treated
/// as errors, so any well-typed value produces a valid audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAttributes {
    /// Page URL
    pub url: String,
    /// Contents of the `<title>` tag
    pub title: Option<String>,
    /// Contents of `<meta name="description">`
    pub meta_description: Option<String>,
    /// Text of each H1 tag, in document order
    #[serde(default)]
    pub h1_tags: Vec<String>,
    /// Text of each H2 tag, in document order
    #[serde(default)]
    pub h2_tags: Vec<String>,
    /// Whitespace-delimited word count of the page text
    #[serde(default)]
    pub word_count: usize,
    /// Total number of `<img>` tags
    #[serde(default)]
    pub images: usize,
    /// Number of images with no alt text
    #[serde(default)]
    pub images_without_alt: usize,
    /// Number of distinct same-host links
    #[serde(default)]
    pub internal_links: usize,
    /// Number of distinct other-host links
    #[serde(default)]
    pub external_links: usize,
}

/// The six scoring categories, in evaluation order.
///
/// The derived `Ord` follows declaration order; the auditor relies on it to
/// keep issue and recommendation concatenation stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Title,
    MetaDescription,
    Headings,
    Content,
    Images,
    Links,
}

impl Category {
    /// All categories in evaluation order
    pub const ALL: [Category; 6] = [
        Category::Title,
        Category::MetaDescription,
        Category::Headings,
        Category::Content,
        Category::Images,
        Category::Links,
    ];

    /// Weight of this category in the overall score (weights sum to 1.0)
    pub fn weight(&self) -> f64 {
        match self {
            Category::Title => 0.25,
            Category::MetaDescription => 0.20,
            Category::Headings => 0.20,
            Category::Content => 0.15,
            Category::Images => 0.10,
            Category::Links => 0.10,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Title => write!(f, "Title"),
            Category::MetaDescription => write!(f, "Meta Description"),
            Category::Headings => write!(f, "Headings"),
            Category::Content => write!(f, "Content"),
            Category::Images => write!(f, "Images"),
            Category::Links => write!(f, "Links"),
        }
    }
}

/// Structured identity of an issue, decoupled from its message wording.
///
/// Aggregation counts by kind, so rewording a message can never change the
/// site summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    MissingTitle,
    TitleTooShort,
    TitleTooLong,
    TitleDuplicateWords,
    MissingMetaDescription,
    MetaDescriptionTooShort,
    MetaDescriptionTooLong,
    MissingH1,
    MultipleH1,
    H1TooShort,
    H1TooLong,
    LowWordCount,
    ImagesMissingAlt,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::MissingTitle => write!(f, "missing-title"),
            IssueKind::TitleTooShort => write!(f, "title-too-short"),
            IssueKind::TitleTooLong => write!(f, "title-too-long"),
            IssueKind::TitleDuplicateWords => write!(f, "title-duplicate-words"),
            IssueKind::MissingMetaDescription => write!(f, "missing-meta-description"),
            IssueKind::MetaDescriptionTooShort => write!(f, "meta-description-too-short"),
            IssueKind::MetaDescriptionTooLong => write!(f, "meta-description-too-long"),
            IssueKind::MissingH1 => write!(f, "missing-h1"),
            IssueKind::MultipleH1 => write!(f, "multiple-h1"),
            IssueKind::H1TooShort => write!(f, "h1-too-short"),
            IssueKind::H1TooLong => write!(f, "h1-too-long"),
            IssueKind::LowWordCount => write!(f, "low-word-count"),
            IssueKind::ImagesMissingAlt => write!(f, "images-missing-alt"),
        }
    }
}

/// A concrete SEO defect found on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Structured kind, used for site-level aggregation
    pub kind: IssueKind,
    /// Human-readable diagnostic
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result of evaluating one category on one page
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult {
    /// Category score, clamped to 0-100
    pub score: u8,
    /// Issues found by this category's checks
    pub issues: Vec<Issue>,
    /// Improvement suggestions; may be present without a matching issue
    pub recommendations: Vec<String>,
}

/// Subset of page attributes echoed into the audit for display and for
/// feeding the AI suggestion generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoData {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_tags: Vec<String>,
    pub word_count: usize,
    pub url: String,
}

/// Full audit of a single page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAudit {
    /// Audited page URL
    pub url: String,
    /// Per-category scores (0-100), keyed in evaluation order
    pub scores: BTreeMap<Category, u8>,
    /// All category issues, in category evaluation order
    pub issues: Vec<Issue>,
    /// All category recommendations, in category evaluation order
    pub recommendations: Vec<String>,
    /// Weighted overall score, rounded to 1 decimal
    pub overall_score: f64,
    /// Echo of display-relevant input attributes
    pub seo_data: SeoData,
}

/// Count of one issue kind across a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCount {
    pub kind: IssueKind,
    pub count: usize,
}

/// Cross-page summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of pages audited
    pub total_pages: usize,
    /// Mean of per-page overall scores, rounded to 1 decimal (0 when empty)
    pub average_score: f64,
    /// Top 5 issue kinds by count descending, ties by first-seen order
    pub common_issues: Vec<IssueCount>,
    /// Total count of individual issues (not distinct kinds)
    pub total_issues: usize,
}

/// Result of auditing an ordered batch of pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Per-page audits, in input order
    pub pages: Vec<PageAudit>,
    pub summary: BatchSummary,
}

/// Public API: audit a single page. Usable independently of batch
/// aggregation, e.g. for incremental analysis.
pub fn audit_page(page: &PageAttributes) -> PageAudit {
    auditor::PageAuditor::new().audit_page(page)
}

/// Public API: audit an ordered batch of pages and compute the summary.
pub fn audit_pages(pages: &[PageAttributes]) -> BatchResult {
    auditor::PageAuditor::new().audit_pages(pages)
}
