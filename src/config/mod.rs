//! Configuration loading for sitegrade

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = ".sitegraderc.json";

const DEFAULT_CRAWL_LIMIT: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "sitegrade/0.1";
const DEFAULT_OUTPUT_DIR: &str = "results";
const DEFAULT_LOCAL_AI_ENDPOINT: &str = "http://localhost:1234/v1/chat/completions";

/// Configuration file schema. All fields optional; accessors apply defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Maximum number of pages to crawl and audit
    pub crawl_limit: Option<usize>,
    /// HTTP timeout in seconds
    pub timeout_secs: Option<u64>,
    /// User agent sent with every request
    pub user_agent: Option<String>,
    /// Directory for saved JSON reports
    pub output_dir: Option<String>,
    /// SerpApi key for rank checking (env SERPAPI_KEY overrides)
    pub serpapi_key: Option<String>,
    /// OpenRouter key for AI suggestions (env OPENROUTER_API_KEY overrides)
    pub openrouter_key: Option<String>,
    /// OpenAI-chat-compatible local endpoint (e.g. LMStudio)
    pub local_ai_endpoint: Option<String>,
    /// Model name sent to the OpenRouter endpoint
    pub ai_model: Option<String>,
    /// Glob patterns for URLs to exclude from auditing
    pub ignore: Vec<String>,
}

impl Config {
    /// CLI flags override config file values
    pub fn merge_with_cli(mut self, pages: Option<usize>, output_dir: Option<&Path>) -> Self {
        if pages.is_some() {
            self.crawl_limit = pages;
        }
        if let Some(dir) = output_dir {
            self.output_dir = Some(dir.to_string_lossy().into_owned());
        }
        self
    }

    pub fn crawl_limit(&self) -> usize {
        self.crawl_limit.unwrap_or(DEFAULT_CRAWL_LIMIT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    /// SerpApi key: environment takes precedence over the config file
    pub fn serpapi_key(&self) -> Option<String> {
        std::env::var("SERPAPI_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.serpapi_key.clone().filter(|k| !k.is_empty()))
    }

    /// OpenRouter key: environment takes precedence over the config file
    pub fn openrouter_key(&self) -> Option<String> {
        std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.openrouter_key.clone().filter(|k| !k.is_empty()))
    }

    pub fn local_ai_endpoint(&self) -> &str {
        self.local_ai_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_LOCAL_AI_ENDPOINT)
    }
}

/// Find and load the config file, searching the working directory then its
/// parents. A missing file yields the default config.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Build a GlobSet from URL ignore patterns
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| anyhow::anyhow!("{}", e))
}

/// Check whether a URL matches the configured ignore patterns
pub fn is_ignored(url: &str, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(url)
}
