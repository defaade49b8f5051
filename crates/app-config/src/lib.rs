// In crates/app-config/src/lib.rs

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AnalysisSettings, AppSettings, LlmSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Starts from built-in defaults.
/// 2. Merges an optional `config/base.toml` file.
/// 3. Merges an optional environment-specific file (e.g., `development.toml`).
/// 4. Merges settings from environment variables.
/// 5. Takes the API key from `GROQ_API_KEY` if it is set.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    // 1. Built-in defaults.
    let settings = defaults(&environment)?
        // 2. Load the base configuration file.
        .add_source(File::with_name("config/base").required(false))
        // 3. Load the environment-specific configuration file.
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // 4. Load settings from environment variables (e.g., `APP__LLM__MODEL=...`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        // 5. The conventional API key variable wins.
        .set_override_option("llm.api_key", std::env::var("GROQ_API_KEY").ok())?
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("app.environment", environment)?
        .set_default("app.log_level", "info")?
        .set_default("analysis.insight_metric", "expectancy")?
        .set_default("analysis.insight_threshold", 0.15)?
        .set_default("analysis.low_sample_threshold", 5)?
        .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
        .set_default("llm.model", "llama-3.3-70b-versatile")?
        .set_default("llm.temperature", 0.3)?
        .set_default("llm.max_tokens", 3000)?)
}
