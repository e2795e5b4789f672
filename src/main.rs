//! Sitegrade: SEO audit CLI

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sitegrade::auditor::PageAuditor;
use sitegrade::config::{build_ignore_set, is_ignored, load_config};
use sitegrade::crawler::SiteCrawler;
use sitegrade::rank::RankChecker;
use sitegrade::reporter::{ConsoleReporter, JsonReporter, SeoReport};
use sitegrade::suggestions::{AiSuggestionGenerator, PageSuggestions};
use sitegrade::{BatchResult, PageAttributes};
use std::path::PathBuf;
use std::process::ExitCode;
use url::Url;

/// Pages sent to the AI endpoint when --ai is set
const AI_PAGE_LIMIT: usize = 3;

/// Sitegrade: SEO auditor for websites
#[derive(Parser, Debug)]
#[command(name = "sitegrade")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Website URL to crawl and audit (omit with --from-json)
    #[arg(required_unless_present = "from_json")]
    url: Option<String>,

    /// Keywords to check rankings for (comma-separated)
    #[arg(long, short, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Maximum number of pages to audit
    #[arg(long, short)]
    pages: Option<usize>,

    /// Generate AI improvement suggestions for the weakest pages
    #[arg(long)]
    ai: bool,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Directory for saved reports
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Save the full report as a timestamped JSON file
    #[arg(long)]
    save: bool,

    /// Audit previously saved page data instead of crawling
    #[arg(long, value_name = "FILE")]
    from_json: Option<PathBuf>,

    /// Quiet mode (one line per page)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Audit pages in parallel (default for large batches)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,

    /// Path to config file (default: search .sitegraderc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let work_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&work_dir, args.config.as_deref())?
        .merge_with_cli(args.pages, args.output_dir.as_deref());

    // Build ignore set from config
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    // Collect pages: either from a saved file or by crawling
    let mut pages = if let Some(ref path) = args.from_json {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page data: {}", path.display()))?;
        let pages: Vec<PageAttributes> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid page data in {}", path.display()))?;
        pages
    } else {
        let url = args.url.as_deref().expect("url required when not using --from-json");
        crawl_site(url, &config, args.quiet)?
    };

    if let Some(ref set) = ignore_set {
        pages.retain(|p| !is_ignored(&p.url, set));
    }

    if pages.is_empty() {
        eprintln!("{}: No pages to audit", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }
    pages.truncate(config.crawl_limit());

    // Set up parallel processing
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let auditor = PageAuditor::new();
    let use_parallel = args.parallel || pages.len() > 10;
    let result = if use_parallel {
        auditor.audit_pages_parallel(&pages)
    } else {
        auditor.audit_pages(&pages)
    };

    // AI suggestions for the lowest-scoring pages
    let suggestions = if args.ai {
        generate_suggestions(&config, &pages, &result, args.quiet)?
    } else {
        Vec::new()
    };

    // Keyword rankings against the site's domain
    let rankings = match (args.keywords.is_empty(), args.url.as_deref()) {
        (false, Some(url)) => {
            let domain = Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
                .with_context(|| format!("Cannot derive a domain from {url}"))?;
            if !args.quiet {
                eprintln!(
                    "{}: Checking {} keyword rankings for {}",
                    "Info".blue(),
                    args.keywords.len(),
                    domain
                );
            }
            RankChecker::from_config(&config)?.check_multiple_keywords(&domain, &args.keywords)
        }
        (false, None) => {
            eprintln!(
                "{}: --keywords requires a website URL, skipping rank check",
                "Warning".yellow()
            );
            Vec::new()
        }
        _ => Vec::new(),
    };

    let website_url = args
        .url
        .clone()
        .unwrap_or_else(|| pages[0].url.clone());
    let report = SeoReport::new(&website_url, &result)
        .with_suggestions(&suggestions)
        .with_rankings(&rankings);

    // Output results
    if args.json {
        println!("{}", JsonReporter::new().pretty().report_full(&report));
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for page in &result.pages {
            reporter.report_quiet(page);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report(&result);
        reporter.report_suggestions(&suggestions);
        reporter.report_rankings(&rankings);
    }

    if args.save {
        let path = JsonReporter::new()
            .pretty()
            .write_report(&report, std::path::Path::new(config.output_dir()))?;
        if !args.quiet {
            eprintln!("{}: Report saved to {}", "Info".blue(), path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Crawl a site: sitemap first, breadth-first fallback
fn crawl_site(url: &str, config: &sitegrade::config::Config, quiet: bool) -> Result<Vec<PageAttributes>> {
    let crawler = SiteCrawler::new(url, config.crawl_limit(), config.timeout(), config.user_agent())
        .with_context(|| format!("Cannot crawl {url}"))?;

    let sitemap_urls = crawler.sitemap_urls();
    let pages = if sitemap_urls.is_empty() {
        if !quiet {
            eprintln!(
                "{}: No sitemap found, crawling from {}",
                "Info".blue(),
                url
            );
        }
        crawler.crawl()
    } else {
        if !quiet {
            eprintln!(
                "{}: Found {} URLs in sitemap",
                "Info".blue(),
                sitemap_urls.len()
            );
        }
        crawler.fetch_pages(&sitemap_urls)
    };

    Ok(pages)
}

/// Generate AI suggestions for the lowest-scoring pages, worst first
fn generate_suggestions(
    config: &sitegrade::config::Config,
    pages: &[PageAttributes],
    result: &BatchResult,
    quiet: bool,
) -> Result<Vec<PageSuggestions>> {
    let generator = AiSuggestionGenerator::from_config(config)?;

    let mut ranked: Vec<usize> = (0..result.pages.len()).collect();
    ranked.sort_by(|a, b| {
        result.pages[*a]
            .overall_score
            .partial_cmp(&result.pages[*b].overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut suggestions = Vec::new();
    for &i in ranked.iter().take(AI_PAGE_LIMIT) {
        if !quiet {
            eprintln!("{}: Generating suggestions for {}", "AI".cyan().bold(), pages[i].url);
        }
        match generator.suggest(&pages[i]) {
            Ok(s) => suggestions.push(s),
            Err(e) => {
                eprintln!(
                    "{}: suggestions for {} failed: {}",
                    "Warning".yellow(),
                    pages[i].url,
                    e
                );
            }
        }
    }
    Ok(suggestions)
}
