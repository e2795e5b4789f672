//! Console reporter with colored output

use crate::keywords::extract_keywords;
use crate::rank::{rank_summary, RankResult};
use crate::suggestions::PageSuggestions;
use crate::{BatchResult, PageAudit};
use colored::Colorize;

/// Keyword candidates shown per page in verbose mode
const KEYWORD_LIMIT: usize = 5;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a full batch: per-page details followed by the summary
    pub fn report(&self, result: &BatchResult) {
        for page in &result.pages {
            self.report_page(page);
            println!("{}", "─".repeat(60));
        }
        self.print_summary(result);
    }

    /// Report one page's audit
    pub fn report_page(&self, audit: &PageAudit) {
        println!();
        println!("{}", format!("📊 SEO Audit: {}", audit.url).bold());
        let score_bar = self.create_score_bar(audit.overall_score);
        println!("   Score: {}", score_bar);
        println!();

        println!("   {}", "Category Breakdown:".bold());
        for (category, score) in &audit.scores {
            let bar = self.create_mini_bar(*score);
            let score_str = format!("{:>3}/100", score);
            let colored_score = if *score >= 80 {
                score_str.green()
            } else if *score >= 60 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            println!("   {} {} {}", bar, colored_score, category);
        }
        println!();

        if !audit.issues.is_empty() {
            println!("   {}", "Issues Found:".bold());
            for issue in &audit.issues {
                println!(
                    "   {} [{}] {}",
                    "✗".red(),
                    issue.kind.to_string().dimmed(),
                    issue.message
                );
            }
            println!();
        }

        if !audit.recommendations.is_empty() {
            println!("   {}", "Recommendations:".bold());
            let shown = if self.verbose {
                audit.recommendations.len()
            } else {
                3
            };
            for rec in audit.recommendations.iter().take(shown) {
                println!("   {} {}", "→".cyan(), rec);
            }
            if !self.verbose && audit.recommendations.len() > 3 {
                println!(
                    "   {} {} more (use --verbose to show)",
                    "ℹ".blue(),
                    audit.recommendations.len() - 3
                );
            }
        }

        if self.verbose {
            let keywords = page_keywords(audit);
            if !keywords.is_empty() {
                println!();
                println!("   Keyword candidates: {}", keywords.join(", ").italic());
            }
        }
    }

    /// Report in quiet mode (just URL and score)
    pub fn report_quiet(&self, audit: &PageAudit) {
        println!("{}: {}", audit.url, self.colorize_score(audit.overall_score));
    }

    fn print_summary(&self, result: &BatchResult) {
        let summary = &result.summary;
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Pages analyzed: {}",
            summary.total_pages.to_string().bold()
        );
        println!(
            "   Average score:  {}",
            self.colorize_score(summary.average_score).bold()
        );
        println!("   Total issues:   {}", summary.total_issues);

        if !summary.common_issues.is_empty() {
            println!();
            println!("   {}", "Most common issues:".bold());
            for issue in &summary.common_issues {
                println!("   {} {}: {} occurrences", "•".dimmed(), issue.kind, issue.count);
            }
        }
        println!();
    }

    /// Print AI suggestions for the pages that received them
    pub fn report_suggestions(&self, suggestions: &[PageSuggestions]) {
        if suggestions.is_empty() {
            return;
        }
        println!("{}", "🤖 AI Suggestions".bold());
        for suggestion in suggestions {
            println!();
            println!("   URL: {}", suggestion.url);
            println!("   Title: {}", suggestion.title);
            println!("   Meta:  {}", suggestion.meta_description);
            if self.verbose {
                println!("   Content: {}", suggestion.content);
            }
        }
        println!();
    }

    /// Print keyword rankings with a short summary line
    pub fn report_rankings(&self, rankings: &[RankResult]) {
        if rankings.is_empty() {
            return;
        }
        println!("{}", "🔍 Keyword Rankings".bold());
        for result in rankings {
            let position = match result.rank {
                Some(rank) if rank <= 10 => format!("Position {rank}").green().to_string(),
                Some(rank) => format!("Position {rank}").yellow().to_string(),
                None => "Not Found".red().to_string(),
            };
            println!("   {} {}: {}", "•".dimmed(), result.keyword, position);
        }
        let summary = rank_summary(rankings);
        println!(
            "   {}/{} keywords ranked, {} in the top 10",
            summary.ranked_keywords, summary.total_keywords, summary.top_10_positions
        );
        println!();
    }

    fn colorize_score(&self, score: f64) -> colored::ColoredString {
        let s = format!("{score}/100");
        if score >= 80.0 {
            s.green()
        } else if score >= 60.0 {
            s.yellow()
        } else {
            s.red()
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score * 20.0) / 100.0).round() as usize;
        let filled = filled.min(20);
        let empty = 20 - filled;

        let bar = format!("[{}{}] {}/100", "█".repeat(filled), "░".repeat(empty), score);

        if score >= 80.0 {
            bar.green().to_string()
        } else if score >= 60.0 {
            bar.yellow().to_string()
        } else {
            bar.red().to_string()
        }
    }

    fn create_mini_bar(&self, score: u8) -> String {
        let filled = (score as usize * 10) / 100;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

/// Keyword candidates from the page's own metadata text
fn page_keywords(audit: &PageAudit) -> Vec<String> {
    let data = &audit.seo_data;
    let mut text = String::new();
    if let Some(title) = &data.title {
        text.push_str(title);
        text.push(' ');
    }
    if let Some(meta) = &data.meta_description {
        text.push_str(meta);
        text.push(' ');
    }
    for h1 in &data.h1_tags {
        text.push_str(h1);
        text.push(' ');
    }
    extract_keywords(&text, KEYWORD_LIMIT)
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bar_bounds() {
        let reporter = ConsoleReporter::new();
        assert!(reporter.create_score_bar(0.0).contains("░░░░░░░░░░░░░░░░░░░░"));
        assert!(reporter.create_score_bar(100.0).contains("████████████████████"));
    }

    #[test]
    fn mini_bar_is_ten_cells() {
        let reporter = ConsoleReporter::new();
        let bar = reporter.create_mini_bar(50);
        assert_eq!(bar.chars().count(), 12);
    }

    #[test]
    fn keyword_candidates_rank_repeated_terms_first() {
        let audit = crate::audit_page(&crate::PageAttributes {
            url: "https://example.com/".to_string(),
            title: Some("Tomato growing guide".to_string()),
            meta_description: Some("Grow tomato plants from seed".to_string()),
            h1_tags: vec!["Tomato care basics".to_string()],
            ..crate::PageAttributes::default()
        });
        let keywords = page_keywords(&audit);
        assert_eq!(keywords.first().map(String::as_str), Some("tomato"));
        assert!(keywords.len() <= KEYWORD_LIMIT);
    }
}
