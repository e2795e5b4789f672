//! Page attribute extraction from fetched HTML.
//!
//! Pure functions over the document text; the auditor never sees HTML,
//! only the extracted [`PageAttributes`].

use crate::PageAttributes;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

fn selector(css: &'static str) -> Selector {
    // All call sites pass literal, known-valid CSS
    Selector::parse(css).expect("static selector")
}

/// Extract the audit-relevant attributes from one page's HTML
pub fn extract_page_attributes(page_url: &str, html: &str) -> PageAttributes {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title");
    let meta_description = meta_description(&document);
    let h1_tags = heading_texts(&document, "h1");
    let h2_tags = heading_texts(&document, "h2");
    let word_count = word_count(&document);
    let (images, images_without_alt) = image_counts(&document);
    let (internal_links, external_links) = link_counts(&document, page_url);

    PageAttributes {
        url: page_url.to_string(),
        title,
        meta_description,
        h1_tags,
        h2_tags,
        word_count,
        images,
        images_without_alt,
        internal_links,
        external_links,
    }
}

fn first_text(document: &Html, css: &'static str) -> Option<String> {
    document
        .select(&selector(css))
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|t| !t.is_empty())
}

fn meta_description(document: &Html) -> Option<String> {
    document
        .select(&selector(r#"meta[name="description"]"#))
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn heading_texts(document: &Html, css: &'static str) -> Vec<String> {
    document
        .select(&selector(css))
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .collect()
}

fn word_count(document: &Html) -> usize {
    document
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .count()
}

fn image_counts(document: &Html) -> (usize, usize) {
    let mut total = 0;
    let mut without_alt = 0;
    for img in document.select(&selector("img")) {
        total += 1;
        let alt = img.value().attr("alt").unwrap_or("");
        if alt.is_empty() {
            without_alt += 1;
        }
    }
    (total, without_alt)
}

/// Count distinct same-host and other-host links, resolved against the
/// page URL. Fragment-only and unparsable hrefs are ignored.
fn link_counts(document: &Html, page_url: &str) -> (usize, usize) {
    let Ok(base) = Url::parse(page_url) else {
        return (0, 0);
    };
    let base_host = base.host_str().unwrap_or("");

    let mut internal: HashSet<String> = HashSet::new();
    let mut external: HashSet<String> = HashSet::new();

    for anchor in document.select(&selector("a[href]")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        match resolved.host_str() {
            Some(host) if host == base_host => {
                internal.insert(resolved.to_string());
            }
            Some(_) => {
                external.insert(resolved.to_string());
            }
            None => {}
        }
    }

    (internal.len(), external.len())
}

/// Internal links of a page, used by the manual crawler to find more pages
pub fn internal_link_urls(html: &str, page_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };
    let base_host = base.host_str().unwrap_or("");

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for anchor in document.select(&selector("a[href]")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(mut resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        if resolved.host_str() != Some(base_host) {
            continue;
        }
        resolved.set_fragment(None);
        let link = resolved.to_string();
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }
    links
}
