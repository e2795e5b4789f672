//! Search ranking lookups.
//!
//! Uses SerpApi when a key is configured, otherwise falls back to scraping
//! the result page directly. Both paths produce the same [`RankResult`]
//! shape; "not found" is a rank of `None`, not an error.

use crate::config::Config;
use colored::Colorize;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Results inspected by the scraping fallback
const SCRAPE_RESULT_COUNT: usize = 50;
/// Results requested from SerpApi
const SERPAPI_RESULT_COUNT: usize = 100;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search API returned status {0}")]
    ApiStatus(reqwest::StatusCode),
    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// How a ranking was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMethod {
    Serpapi,
    Scraping,
}

/// Position of a domain for one keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResult {
    pub keyword: String,
    pub domain: String,
    /// 1-based position, `None` when not found in the inspected results
    pub rank: Option<u32>,
    /// URL of the ranking result, when found
    pub url: Option<String>,
    /// Title of the ranking result, when found
    pub title: Option<String>,
    pub method: RankMethod,
}

/// Aggregate view over a set of rank results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankSummary {
    pub total_keywords: usize,
    pub ranked_keywords: usize,
    pub not_ranked: usize,
    pub top_10_positions: usize,
    pub top_50_positions: usize,
    pub average_rank: Option<f64>,
    pub best_rank: Option<u32>,
    pub worst_rank: Option<u32>,
}

/// Checker for keyword rankings of one domain
pub struct RankChecker {
    client: reqwest::blocking::Client,
    serpapi_key: Option<String>,
    delay: Duration,
}

impl RankChecker {
    pub fn from_config(config: &Config) -> Result<Self, RankError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            serpapi_key: config.serpapi_key(),
            // Polite delay between keyword lookups
            delay: Duration::from_secs(2),
        })
    }

    /// Look up the rank of `domain` for one keyword
    pub fn check_keyword_rank(&self, domain: &str, keyword: &str) -> Result<RankResult, RankError> {
        match self.serpapi_key.as_deref() {
            Some(key) => self.check_with_serpapi(domain, keyword, key),
            None => self.check_with_scraping(domain, keyword),
        }
    }

    /// Look up several keywords with a polite delay between requests.
    /// Transport failures are reported and skipped, not fatal.
    pub fn check_multiple_keywords(&self, domain: &str, keywords: &[String]) -> Vec<RankResult> {
        let mut results = Vec::new();
        for (i, keyword) in keywords.iter().enumerate() {
            match self.check_keyword_rank(domain, keyword) {
                Ok(result) => results.push(result),
                Err(e) => {
                    eprintln!("{}: rank check for '{}' failed: {}", "Warning".yellow(), keyword, e);
                }
            }
            if i + 1 < keywords.len() {
                std::thread::sleep(self.delay);
            }
        }
        results
    }

    fn check_with_serpapi(
        &self,
        domain: &str,
        keyword: &str,
        key: &str,
    ) -> Result<RankResult, RankError> {
        let response = self
            .client
            .get("https://serpapi.com/search")
            .query(&[
                ("engine", "google"),
                ("q", keyword),
                ("gl", "us"),
                ("hl", "en"),
                ("num", &SERPAPI_RESULT_COUNT.to_string()),
                ("api_key", key),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(RankError::ApiStatus(response.status()));
        }

        let body: serde_json::Value = response.json()?;
        let organic = body
            .get("organic_results")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        for (i, result) in organic.iter().enumerate() {
            let link = result.get("link").and_then(|v| v.as_str()).unwrap_or("");
            if domain_matches(link, domain) {
                return Ok(RankResult {
                    keyword: keyword.to_string(),
                    domain: domain.to_string(),
                    rank: Some(i as u32 + 1),
                    url: Some(link.to_string()),
                    title: result
                        .get("title")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                    method: RankMethod::Serpapi,
                });
            }
        }

        Ok(not_found(keyword, domain, RankMethod::Serpapi))
    }

    fn check_with_scraping(&self, domain: &str, keyword: &str) -> Result<RankResult, RankError> {
        let search_url = Url::parse_with_params(
            "https://www.google.com/search",
            &[("q", keyword), ("num", &SCRAPE_RESULT_COUNT.to_string())],
        )?;

        let response = self.client.get(search_url).send()?;
        if !response.status().is_success() {
            return Err(RankError::ApiStatus(response.status()));
        }
        let html = response.text()?;

        Ok(match find_rank_in_serp(&html, domain) {
            Some(found) => RankResult {
                keyword: keyword.to_string(),
                domain: domain.to_string(),
                rank: Some(found.position),
                url: Some(found.url),
                title: found.title,
                method: RankMethod::Scraping,
            },
            None => not_found(keyword, domain, RankMethod::Scraping),
        })
    }
}

fn not_found(keyword: &str, domain: &str, method: RankMethod) -> RankResult {
    RankResult {
        keyword: keyword.to_string(),
        domain: domain.to_string(),
        rank: None,
        url: None,
        title: None,
        method,
    }
}

struct SerpHit {
    position: u32,
    url: String,
    title: Option<String>,
}

/// Case-insensitive substring match of the target domain against a result
/// URL's host
fn domain_matches(link: &str, domain: &str) -> bool {
    let Ok(parsed) = Url::parse(link) else {
        return false;
    };
    parsed
        .host_str()
        .map(|host| host.to_lowercase().contains(&domain.to_lowercase()))
        .unwrap_or(false)
}

/// Find the first organic result whose host matches the domain.
/// Organic results live in `div.g` containers with an `<a>` and `<h3>`.
fn find_rank_in_serp(html: &str, domain: &str) -> Option<SerpHit> {
    let document = Html::parse_document(html);
    let result_selector = Selector::parse("div.g").expect("static selector");
    let link_selector = Selector::parse("a[href]").expect("static selector");
    let title_selector = Selector::parse("h3").expect("static selector");

    for (i, result) in document.select(&result_selector).enumerate() {
        let Some(link) = result.select(&link_selector).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if domain_matches(href, domain) {
            let title = result
                .select(&title_selector)
                .next()
                .map(|t| t.text().collect::<Vec<_>>().join(" ").trim().to_string());
            return Some(SerpHit {
                position: i as u32 + 1,
                url: href.to_string(),
                title,
            });
        }
    }
    None
}

/// Summarize a set of rank results
pub fn rank_summary(results: &[RankResult]) -> RankSummary {
    let ranks: Vec<u32> = results.iter().filter_map(|r| r.rank).collect();
    let ranked = ranks.len();

    let average_rank = if ranked > 0 {
        let total: u32 = ranks.iter().sum();
        Some((f64::from(total) / ranked as f64 * 10.0).round() / 10.0)
    } else {
        None
    };

    RankSummary {
        total_keywords: results.len(),
        ranked_keywords: ranked,
        not_ranked: results.len() - ranked,
        top_10_positions: ranks.iter().filter(|r| **r <= 10).count(),
        top_50_positions: ranks.iter().filter(|r| **r <= 50).count(),
        average_rank,
        best_rank: ranks.iter().min().copied(),
        worst_rank: ranks.iter().max().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(keyword: &str, rank: Option<u32>) -> RankResult {
        RankResult {
            keyword: keyword.to_string(),
            domain: "example.com".to_string(),
            rank,
            url: None,
            title: None,
            method: RankMethod::Scraping,
        }
    }

    #[test]
    fn summary_over_mixed_results() {
        let results = vec![
            result("a", Some(3)),
            result("b", Some(15)),
            result("c", None),
            result("d", Some(60)),
        ];
        let summary = rank_summary(&results);
        assert_eq!(summary.total_keywords, 4);
        assert_eq!(summary.ranked_keywords, 3);
        assert_eq!(summary.not_ranked, 1);
        assert_eq!(summary.top_10_positions, 1);
        assert_eq!(summary.top_50_positions, 2);
        assert_eq!(summary.average_rank, Some(26.0));
        assert_eq!(summary.best_rank, Some(3));
        assert_eq!(summary.worst_rank, Some(60));
    }

    #[test]
    fn summary_with_no_ranked_keywords() {
        let summary = rank_summary(&[result("a", None)]);
        assert_eq!(summary.ranked_keywords, 0);
        assert_eq!(summary.average_rank, None);
        assert_eq!(summary.best_rank, None);
    }

    #[test]
    fn summary_of_empty_input() {
        let summary = rank_summary(&[]);
        assert_eq!(summary.total_keywords, 0);
        assert_eq!(summary.not_ranked, 0);
    }

    #[test]
    fn domain_matching_is_case_insensitive_on_host() {
        assert!(domain_matches("https://WWW.Example.COM/page", "example.com"));
        assert!(domain_matches("https://blog.example.com/", "example.com"));
        assert!(!domain_matches("https://other.org/example.com", "example.com"));
        assert!(!domain_matches("not a url", "example.com"));
    }

    #[test]
    fn finds_rank_in_serp_html() {
        let html = r#"
            <div class="g"><a href="https://first.org/x"><h3>First</h3></a></div>
            <div class="g"><a href="https://example.com/hit"><h3>The Hit</h3></a></div>
            <div class="g"><a href="https://third.net/y"><h3>Third</h3></a></div>
        "#;
        let hit = find_rank_in_serp(html, "example.com").expect("should find example.com");
        assert_eq!(hit.position, 2);
        assert_eq!(hit.url, "https://example.com/hit");
        assert_eq!(hit.title.as_deref(), Some("The Hit"));
    }

    #[test]
    fn serp_without_domain_yields_none() {
        let html = r#"<div class="g"><a href="https://first.org/x"><h3>First</h3></a></div>"#;
        assert!(find_rank_in_serp(html, "example.com").is_none());
    }
}
