// In crates/llm-client/src/lib.rs

use analytics::AnalysisReport;
use app_config::LlmSettings;

pub mod error;
pub mod prompt;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use prompt::{SYSTEM_PROMPT, build_prompt};
use types::{ChatMessage, ChatRequest, ChatResponse};

const PLACEHOLDER_API_KEY: &str = "your_api_key_here";
const DEFAULT_LOW_SAMPLE_THRESHOLD: u32 = 5;

/// A client for an OpenAI-compatible chat completions API that turns an
/// analysis report into a written performance review.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    low_sample_threshold: u32,
}

impl LlmClient {
    /// Constructs a new LlmClient from LlmSettings.
    ///
    /// Fails with [`Error::MissingApiKey`] if the key is empty or still the
    /// placeholder from `.env.example`.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let api_key = settings.api_key.trim();
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            return Err(Error::MissingApiKey);
        }

        Ok(Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            low_sample_threshold: DEFAULT_LOW_SAMPLE_THRESHOLD,
        })
    }

    /// Sets the trade count at or below which the model must flag a segment.
    pub fn with_low_sample_threshold(mut self, threshold: u32) -> Self {
        self.low_sample_threshold = threshold;
        self
    }

    /// Builds the system and user messages for a report.
    ///
    /// The report is serialized as-is; no value is recomputed or reformatted.
    pub fn build_messages(&self, report: &AnalysisReport) -> Result<Vec<ChatMessage>> {
        let report_json = serde_json::to_string_pretty(report)?;
        Ok(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(&report_json, self.low_sample_threshold)),
        ])
    }

    /// Generates a performance report from the analysis.
    ///
    /// This corresponds to the `POST /chat/completions` endpoint.
    pub async fn generate_report(&self, report: &AnalysisReport) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: self.build_messages(report)?,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::info!(model = %self.model, "Requesting performance report from LLM...");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;
        if !status.is_success() {
            return Err(Error::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion: ChatResponse = serde_json::from_str(&text)?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(Error::EmptyResponse)?;

        tracing::info!(chars = content.len(), "Received performance report.");
        Ok(content)
    }
}
