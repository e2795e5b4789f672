//! End-to-end tests over the audit pipeline

use sitegrade::auditor::PageAuditor;
use sitegrade::reporter::{JsonReporter, SeoReport};
use sitegrade::{audit_page, audit_pages, Category, IssueKind, PageAttributes};

fn healthy_page(url: &str) -> PageAttributes {
    PageAttributes {
        url: url.to_string(),
        title: Some("Complete Guide to Growing Organic Tomatoes".to_string()),
        meta_description: Some(
            "Learn how to grow organic tomatoes at home with our complete guide \
             covering soil preparation, watering schedules, and pest control."
                .to_string(),
        ),
        h1_tags: vec!["How to Grow Organic Tomatoes".to_string()],
        h2_tags: vec!["Soil Preparation".to_string(), "Watering".to_string()],
        word_count: 1200,
        images: 4,
        images_without_alt: 0,
        internal_links: 6,
        external_links: 3,
    }
}

fn empty_page(url: &str) -> PageAttributes {
    PageAttributes {
        url: url.to_string(),
        ..PageAttributes::default()
    }
}

#[test]
fn healthy_page_scores_perfect() {
    let audit = audit_page(&healthy_page("https://example.com/tomatoes"));

    assert_eq!(audit.overall_score, 100.0);
    assert!(audit.issues.is_empty());
    assert!(audit.recommendations.is_empty());
    for category in Category::ALL {
        assert_eq!(audit.scores[&category], 100);
    }
}

#[test]
fn empty_page_reports_every_missing_element() {
    let audit = audit_page(&empty_page("https://example.com/"));

    let kinds: Vec<IssueKind> = audit.issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::MissingTitle,
            IssueKind::MissingMetaDescription,
            IssueKind::MissingH1,
            IssueKind::LowWordCount,
        ]
    );

    assert_eq!(audit.scores[&Category::Title], 0);
    assert_eq!(audit.scores[&Category::MetaDescription], 0);
    assert_eq!(audit.overall_score, 36.0);
}

#[test]
fn audits_are_deterministic() {
    let page = PageAttributes {
        title: Some("Short".to_string()),
        h1_tags: vec!["One".to_string(), "Two".to_string()],
        word_count: 350,
        images: 3,
        images_without_alt: 2,
        ..empty_page("https://example.com/messy")
    };

    let first = audit_page(&page);
    let second = audit_page(&page);
    assert_eq!(first, second);
}

#[test]
fn batch_preserves_input_order_and_averages() {
    let pages = vec![
        healthy_page("https://example.com/a"),
        empty_page("https://example.com/b"),
        healthy_page("https://example.com/c"),
    ];
    let result = audit_pages(&pages);

    let urls: Vec<&str> = result.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/c",
        ]
    );

    // (100 + 36 + 100) / 3 = 78.666... -> 78.7
    assert_eq!(result.summary.total_pages, 3);
    assert_eq!(result.summary.average_score, 78.7);
    assert_eq!(result.summary.total_issues, 4);
}

#[test]
fn common_issues_ranked_by_count() {
    let no_title = PageAttributes {
        meta_description: healthy_page("x").meta_description,
        h1_tags: vec!["A heading of a reasonable length".to_string()],
        word_count: 800,
        images: 1,
        internal_links: 2,
        external_links: 1,
        ..empty_page("https://example.com/no-title")
    };

    let pages = vec![
        no_title.clone(),
        PageAttributes {
            url: "https://example.com/no-title-2".to_string(),
            ..no_title.clone()
        },
        empty_page("https://example.com/empty"),
    ];
    let result = audit_pages(&pages);

    let top = &result.summary.common_issues[0];
    assert_eq!(top.kind, IssueKind::MissingTitle);
    assert_eq!(top.count, 3);

    // Counts never increase down the list
    for pair in result.summary.common_issues.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
    assert!(result.summary.common_issues.len() <= 5);
}

#[test]
fn parallel_batch_matches_sequential() {
    let pages: Vec<PageAttributes> = (0..30)
        .map(|i| {
            if i % 3 == 0 {
                healthy_page(&format!("https://example.com/page-{i}"))
            } else {
                empty_page(&format!("https://example.com/page-{i}"))
            }
        })
        .collect();

    let auditor = PageAuditor::new();
    assert_eq!(auditor.audit_pages(&pages), auditor.audit_pages_parallel(&pages));
}

#[test]
fn empty_batch_is_well_defined() {
    let result = audit_pages(&[]);
    assert!(result.pages.is_empty());
    assert_eq!(result.summary.total_pages, 0);
    assert_eq!(result.summary.average_score, 0.0);
    assert!(result.summary.common_issues.is_empty());
}

#[test]
fn report_envelope_round_trips_through_json() {
    let pages = vec![
        healthy_page("https://example.com/a"),
        empty_page("https://example.com/b"),
    ];
    let batch = audit_pages(&pages);
    let report = SeoReport::new("https://example.com", &batch);
    let json = JsonReporter::new().pretty().report_full(&report);

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["websiteUrl"], "https://example.com");
    assert_eq!(parsed["audit"]["summary"]["totalPages"], 2);
    assert_eq!(parsed["audit"]["pages"][0]["overallScore"], 100.0);
    assert_eq!(
        parsed["audit"]["pages"][1]["issues"][0]["kind"],
        "missing-title"
    );
    assert_eq!(
        parsed["audit"]["summary"]["commonIssues"][0]["count"],
        1
    );
}

#[test]
fn page_attributes_deserialize_with_defaults() {
    // Saved page data may omit count fields entirely
    let json = r#"{"url": "https://example.com/", "title": "A title"}"#;
    let page: PageAttributes = serde_json::from_str(json).unwrap();
    assert_eq!(page.word_count, 0);
    assert!(page.h1_tags.is_empty());

    let audit = audit_page(&page);
    assert!(audit
        .issues
        .iter()
        .any(|i| i.kind == IssueKind::LowWordCount));
}
