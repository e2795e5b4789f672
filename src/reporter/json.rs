//! JSON reporter for machine-readable output

use crate::rank::RankResult;
use crate::suggestions::PageSuggestions;
use crate::{BatchResult, PageAudit};
use anyhow::{Context, Result};
use chrono::{Local, SecondsFormat};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Full report envelope written to disk
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport<'a> {
    pub website_url: &'a str,
    pub analysis_date: String,
    pub audit: &'a BatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<&'a [PageSuggestions]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_results: Option<&'a [RankResult]>,
}

impl<'a> SeoReport<'a> {
    pub fn new(website_url: &'a str, audit: &'a BatchResult) -> Self {
        Self {
            website_url,
            analysis_date: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            audit,
            ai_suggestions: None,
            rank_results: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: &'a [PageSuggestions]) -> Self {
        if !suggestions.is_empty() {
            self.ai_suggestions = Some(suggestions);
        }
        self
    }

    pub fn with_rankings(mut self, rankings: &'a [RankResult]) -> Self {
        if !rankings.is_empty() {
            self.rank_results = Some(rankings);
        }
        self
    }
}

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single page audit as JSON
    pub fn report_page(&self, audit: &PageAudit) -> String {
        self.serialize(audit).unwrap_or_else(|_| "{}".to_string())
    }

    /// Report a full batch result as JSON
    pub fn report(&self, result: &BatchResult) -> String {
        self.serialize(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Report the full envelope as JSON
    pub fn report_full(&self, report: &SeoReport) -> String {
        self.serialize(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Write the report to `output_dir` with a timestamped filename.
    /// Returns the path of the written file.
    pub fn write_report(&self, report: &SeoReport, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

        let filename = format!("seo_report_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
        let path = output_dir.join(filename);
        let json = self
            .serialize(report)
            .context("Failed to serialize report")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(path)
    }

    fn serialize<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
