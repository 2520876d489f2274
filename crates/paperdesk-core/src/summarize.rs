//! Article summarization via an OpenAI-compatible chat completion endpoint
//!
//! The core only builds the prompt and surfaces the model output; it never
//! edits the returned text. Service failures map onto [`ServiceError`] and
//! propagate unchanged, with no retries here.

use paperdesk_domain::Article;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::SummarizerSettings;
use crate::error::ServiceError;
use crate::http::{runtime, HttpClient, HttpError};

/// Article text beyond this many characters is truncated before prompting
const MAX_PROMPT_CHARS: usize = 15_000;

/// System and user messages for a summary request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    pub system: String,
    pub user: String,
}

/// Build the summary prompt for an article.
///
/// The model is asked for a structured Markdown summary (main ideas,
/// methodology, results, conclusions) in the configured language, from the
/// article's metadata block. Article text beyond `max_chars` is truncated.
pub fn summary_prompt(article: &Article, language: &str, max_chars: usize) -> SummaryPrompt {
    let mut abstract_text = article.abstract_text.clone();
    if abstract_text.len() > max_chars {
        abstract_text.truncate(max_chars);
        abstract_text.push_str("...");
    }

    let mut info_block = format!(
        "Title: {}\nAuthors: {}\nAbstract: {}\n",
        article.title,
        article.authors.join(", "),
        abstract_text
    );
    if !article.categories.is_empty() {
        info_block.push_str(&format!("Categories: {}\n", article.categories.join(", ")));
    }
    if let Some(year) = article.year {
        info_block.push_str(&format!("Year: {}\n", year));
    }

    SummaryPrompt {
        system: "You are a scientific assistant that writes concise summaries of research papers."
            .to_string(),
        user: format!(
            "Write a structured summary of the following paper, covering its main \
             ideas, methodology, results, and conclusions. Use Markdown headings. \
             Answer in {}.\n\nPaper:\n{}",
            language, info_block
        ),
    }
}

pub struct ChatCompletionSummarizer {
    client: HttpClient,
    settings: SummarizerSettings,
}

impl ChatCompletionSummarizer {
    pub fn new(settings: SummarizerSettings) -> Self {
        Self {
            client: HttpClient::new("paperdesk/0.1"),
            settings,
        }
    }

    /// Request a summary for an article
    pub async fn summarize(&self, article: &Article) -> Result<String, ServiceError> {
        info!(arxiv_id = %article.arxiv_id, model = %self.settings.model, "requesting summary");

        let prompt = summary_prompt(article, &self.settings.language, MAX_PROMPT_CHARS);
        let body = json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
        });

        let url = format!(
            "{}/chat/completions",
            self.settings.api_base.trim_end_matches('/')
        );
        let response = self
            .client
            .post_json(&url, self.settings.api_key.as_deref(), &body)
            .await
            .map_err(map_http_error)?;

        match response.status {
            200 => parse_completion(&response.body),
            401 | 403 => Err(ServiceError::InvalidApiKey),
            status => Err(ServiceError::Api {
                message: format!("completion request failed with status {}", status),
            }),
        }
    }

    /// Blocking wrapper for callers without a tokio runtime
    pub fn summarize_blocking(&self, article: &Article) -> Result<String, ServiceError> {
        runtime().block_on(self.summarize(article))
    }
}

fn map_http_error(e: HttpError) -> ServiceError {
    match e {
        HttpError::RateLimited => ServiceError::RateLimited {
            retry_after_seconds: Some(60),
        },
        other => ServiceError::Network {
            message: other.to_string(),
        },
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

fn parse_completion(body: &str) -> Result<String, ServiceError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Api {
            message: format!("malformed completion response: {}", e),
        })?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ServiceError::Api {
            message: "completion response contained no choices".to_string(),
        })
}
