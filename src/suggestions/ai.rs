//! AI suggestion generator for page improvements.
//!
//! The endpoint is explicit configuration resolved once at construction;
//! the generator never probes services behind the audit engine's back,
//! and the auditor stays ignorant of whether AI is reachable.

use crate::config::Config;
use crate::PageAttributes;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

const DEFAULT_OPENROUTER_MODEL: &str = "mistralai/mistral-large";
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AI endpoint returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed completion response")]
    MalformedResponse,
}

/// A configured chat-completion endpoint
#[derive(Debug, Clone)]
pub enum AiEndpoint {
    /// OpenRouter with a bearer key
    OpenRouter { api_key: String, model: String },
    /// OpenAI-chat-compatible local endpoint (e.g. LMStudio)
    Local { url: String },
}

/// Suggestions generated for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSuggestions {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub content: String,
}

/// Generator calling the endpoint resolved from configuration
pub struct AiSuggestionGenerator {
    endpoint: AiEndpoint,
    client: reqwest::blocking::Client,
}

impl AiSuggestionGenerator {
    /// Build from configuration. The endpoint is resolved once here: an
    /// unreachable endpoint surfaces as a request error on use, never as
    /// hidden fallback behavior.
    pub fn from_config(config: &Config) -> Result<Self, AiError> {
        let endpoint = resolve_endpoint(
            config.openrouter_key(),
            config.ai_model.clone(),
            config.local_ai_endpoint().to_string(),
        );

        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;

        Ok(Self { endpoint, client })
    }

    /// Generate all suggestions for one page
    pub fn suggest(&self, page: &PageAttributes) -> Result<PageSuggestions, AiError> {
        Ok(PageSuggestions {
            url: page.url.clone(),
            title: self.title_suggestion(page, None)?,
            meta_description: self.meta_description_suggestion(page, None)?,
            content: self.content_suggestions(page)?,
        })
    }

    /// Suggest an improved title tag
    pub fn title_suggestion(
        &self,
        page: &PageAttributes,
        target_keyword: Option<&str>,
    ) -> Result<String, AiError> {
        self.complete(&title_prompt(page, target_keyword))
    }

    /// Suggest an improved meta description
    pub fn meta_description_suggestion(
        &self,
        page: &PageAttributes,
        target_keyword: Option<&str>,
    ) -> Result<String, AiError> {
        self.complete(&meta_description_prompt(page, target_keyword))
    }

    /// Suggest content improvements
    pub fn content_suggestions(&self, page: &PageAttributes) -> Result<String, AiError> {
        self.complete(&content_prompt(page))
    }

    /// Generate a bulk keyword list, split from a comma-separated completion
    pub fn bulk_keywords(
        &self,
        page: &PageAttributes,
        target_keyword: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>, AiError> {
        let completion = self.complete(&bulk_keywords_prompt(page, target_keyword, count))?;
        Ok(split_keyword_list(&completion))
    }

    fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let body = json!({
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let request = match &self.endpoint {
            AiEndpoint::OpenRouter { api_key, model } => {
                let mut body = body;
                body["model"] = json!(model);
                self.client
                    .post(OPENROUTER_URL)
                    .bearer_auth(api_key)
                    .json(&body)
            }
            AiEndpoint::Local { url } => self.client.post(url).json(&body),
        };

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Api {
                status,
                body: response.text().unwrap_or_default(),
            });
        }

        let completion: serde_json::Value = response.json()?;
        completion["choices"][0]["message"]["content"]
            .as_str()
            .map(|c| c.trim().to_string())
            .ok_or(AiError::MalformedResponse)
    }
}

/// Pick the endpoint: OpenRouter when a key is configured, the local
/// endpoint (LMStudio-style default) otherwise
fn resolve_endpoint(
    openrouter_key: Option<String>,
    model: Option<String>,
    local_url: String,
) -> AiEndpoint {
    match openrouter_key {
        Some(api_key) => AiEndpoint::OpenRouter {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
        },
        None => AiEndpoint::Local { url: local_url },
    }
}

fn title_prompt(page: &PageAttributes, target_keyword: Option<&str>) -> String {
    format!(
        "Generate an SEO-optimized title tag for this webpage:\n\
         - Current title: \"{}\"\n\
         - URL: {}\n\
         - Content length: {} words\n\
         - Target keyword: {}\n\n\
         Requirements:\n\
         - 50-60 characters long\n\
         - Include target keyword if provided\n\
         - Compelling and click-worthy\n\
         - Accurately describe the content\n\n\
         Return only the suggested title, no explanations.",
        page.title.as_deref().unwrap_or("No title"),
        page.url,
        page.word_count,
        target_keyword.unwrap_or("not specified"),
    )
}

fn meta_description_prompt(page: &PageAttributes, target_keyword: Option<&str>) -> String {
    format!(
        "Generate an SEO-optimized meta description for this webpage:\n\
         - Title: \"{}\"\n\
         - URL: {}\n\
         - Main heading: \"{}\"\n\
         - Target keyword: {}\n\n\
         Requirements:\n\
         - 150-160 characters long\n\
         - Include target keyword naturally if provided\n\
         - Compelling call-to-action\n\
         - Accurately summarize the page content\n\n\
         Return only the suggested meta description, no explanations.",
        page.title.as_deref().unwrap_or("No title"),
        page.url,
        page.h1_tags.first().map(String::as_str).unwrap_or("No H1"),
        target_keyword.unwrap_or("not specified"),
    )
}

fn content_prompt(page: &PageAttributes) -> String {
    let h2_preview = if page.h2_tags.is_empty() {
        "None".to_string()
    } else {
        page.h2_tags
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Analyze this webpage and suggest content improvements:\n\
         - Title: \"{}\"\n\
         - Current word count: {}\n\
         - H1: {}\n\
         - H2 tags: {}\n\n\
         Provide 3-5 specific suggestions to improve SEO and user engagement:\n\
         1. Content structure improvements\n\
         2. Additional topics to cover\n\
         3. SEO optimization tips\n\n\
         Keep suggestions actionable and specific.",
        page.title.as_deref().unwrap_or("No title"),
        page.word_count,
        page.h1_tags.first().map(String::as_str).unwrap_or("Missing"),
        h2_preview,
    )
}

fn bulk_keywords_prompt(page: &PageAttributes, target_keyword: Option<&str>, count: usize) -> String {
    format!(
        "Generate a list of at least {} highly relevant SEO keywords for the following page:\n\
         - Title: \"{}\"\n\
         - Meta Description: \"{}\"\n\
         - Main Heading: \"{}\"\n\
         - Target Keyword: {}\n\n\
         Return the keywords as a plain, comma-separated list, no explanations.",
        count,
        page.title.as_deref().unwrap_or(""),
        page.meta_description.as_deref().unwrap_or(""),
        page.h1_tags.first().map(String::as_str).unwrap_or(""),
        target_keyword.unwrap_or("not specified"),
    )
}

fn split_keyword_list(completion: &str) -> Vec<String> {
    completion
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
