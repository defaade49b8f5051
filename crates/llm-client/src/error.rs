// In crates/llm-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM API key is not set. Add GROQ_API_KEY to the environment or the .env file.")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    #[error("API error: status {status}, body: {body}")]
    ApiError { status: u16, body: String },
    #[error("The model returned no content")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, Error>;
