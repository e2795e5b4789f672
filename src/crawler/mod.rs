//! Site crawler: sitemap discovery, page fetching, attribute extraction.
//!
//! Fetch failures degrade to skipped pages rather than aborting the run;
//! only an unusable base URL or HTTP client is a hard error.

pub mod extract;
pub mod sitemap;

pub use extract::extract_page_attributes;

use crate::PageAttributes;
use colored::Colorize;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Internal links followed per page during a manual crawl
const LINKS_PER_PAGE: usize = 3;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Crawler for one site, bounded by a page limit
pub struct SiteCrawler {
    base: Url,
    limit: usize,
    delay: Duration,
    client: reqwest::blocking::Client,
}

impl SiteCrawler {
    pub fn new(
        base_url: &str,
        limit: usize,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, CrawlError> {
        let base = Url::parse(base_url)?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base,
            limit,
            // Polite per-request delay
            delay: Duration::from_secs(1),
            client,
        })
    }

    #[cfg(test)]
    fn without_delay(mut self) -> Self {
        self.delay = Duration::ZERO;
        self
    }

    /// Discover page URLs from the site's sitemap, trying sitemap.xml,
    /// sitemap_index.xml, then robots.txt `Sitemap:` directives. Returns an
    /// empty list when no sitemap can be found.
    pub fn sitemap_urls(&self) -> Vec<String> {
        let candidates = [
            self.base.join("/sitemap.xml"),
            self.base.join("/sitemap_index.xml"),
        ];

        for candidate in candidates.into_iter().flatten() {
            if let Some(body) = self.fetch_text(candidate.as_str()) {
                let mut urls = sitemap::parse_sitemap(&body);
                if !urls.is_empty() {
                    urls.truncate(self.limit);
                    return urls;
                }
            }
        }

        // Fall back to robots.txt pointers
        if let Ok(robots_url) = self.base.join("/robots.txt") {
            if let Some(robots) = self.fetch_text(robots_url.as_str()) {
                let mut urls = Vec::new();
                for sitemap_url in sitemap::sitemaps_from_robots(&robots) {
                    if let Some(body) = self.fetch_text(&sitemap_url) {
                        urls.extend(sitemap::parse_sitemap(&body));
                    }
                    if urls.len() >= self.limit {
                        break;
                    }
                }
                urls.truncate(self.limit);
                return urls;
            }
        }

        Vec::new()
    }

    /// Fetch and extract attributes for the given URLs, skipping failures
    pub fn fetch_pages(&self, urls: &[String]) -> Vec<PageAttributes> {
        let mut pages = Vec::new();
        for url in urls.iter().take(self.limit) {
            match self.fetch_text(url) {
                Some(html) => pages.push(extract_page_attributes(url, &html)),
                None => {
                    eprintln!("{}: failed to fetch {}", "Warning".yellow(), url);
                }
            }
            std::thread::sleep(self.delay);
        }
        pages
    }

    /// Breadth-first crawl from the base URL when no sitemap is available,
    /// following a few internal links per page up to the limit
    pub fn crawl(&self) -> Vec<PageAttributes> {
        let mut queue: VecDeque<String> = VecDeque::from([self.base.to_string()]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut pages = Vec::new();

        while let Some(url) = queue.pop_front() {
            if pages.len() >= self.limit {
                break;
            }
            if !visited.insert(url.clone()) {
                continue;
            }

            let Some(html) = self.fetch_text(&url) else {
                eprintln!("{}: failed to fetch {}", "Warning".yellow(), url);
                continue;
            };
            pages.push(extract_page_attributes(&url, &html));

            if pages.len() < self.limit {
                for link in extract::internal_link_urls(&html, &url)
                    .into_iter()
                    .take(LINKS_PER_PAGE)
                {
                    if !visited.contains(&link) && !queue.contains(&link) {
                        queue.push_back(link);
                    }
                }
            }

            std::thread::sleep(self.delay);
        }

        pages
    }

    fn fetch_text(&self, url: &str) -> Option<String> {
        let response = self.client.get(url).send().ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.text().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let result = SiteCrawler::new("not a url", 10, Duration::from_secs(5), "test-agent");
        assert!(matches!(result, Err(CrawlError::InvalidUrl(_))));
    }

    #[test]
    fn accepts_valid_base_url() {
        let crawler =
            SiteCrawler::new("https://example.com", 10, Duration::from_secs(5), "test-agent")
                .map(SiteCrawler::without_delay);
        assert!(crawler.is_ok());
    }
}
