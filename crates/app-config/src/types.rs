// In crates/app-config/src/types.rs

use serde::Deserialize;

use analytics::Metric;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// How segments are compared and flagged.
    pub analysis: AnalysisSettings,
    /// Settings for the text-generation service.
    pub llm: LlmSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AnalysisSettings {
    /// Metric segments are ranked by when generating insights.
    pub insight_metric: Metric,
    /// Minimum relative gap between best and worst segment worth reporting.
    pub insight_threshold: f64,
    /// Segments with this many trades or fewer are flagged as low sample size.
    pub low_sample_threshold: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LlmSettings {
    /// The API key. Usually supplied through `GROQ_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of an OpenAI-compatible chat completions API.
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}
