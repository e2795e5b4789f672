//! Sitemap and robots.txt parsing

use regex::Regex;

/// Extract `<loc>` entries from a sitemap or sitemap-index document.
/// Works with or without the sitemaps.org namespace prefix.
pub fn parse_sitemap(xml: &str) -> Vec<String> {
    // <loc> content is a plain URL; non-greedy match tolerates whitespace
    let loc = Regex::new(r"(?s)<(?:\w+:)?loc\s*>\s*(.*?)\s*</(?:\w+:)?loc\s*>")
        .expect("static pattern");
    loc.captures_iter(xml)
        .map(|c| c[1].trim().to_string())
        .filter(|u| !u.is_empty())
        .collect()
}

/// Extract `Sitemap:` directives from a robots.txt body
pub fn sitemaps_from_robots(robots: &str) -> Vec<String> {
    robots
        .lines()
        .filter_map(|line| {
            let lower = line.trim_start().to_lowercase();
            if lower.starts_with("sitemap:") {
                line.trim_start()
                    .splitn(2, ':')
                    .nth(1)
                    .map(|rest| rest.trim().to_string())
                    .filter(|u| !u.is_empty())
            } else {
                None
            }
        })
        .collect()
}
