use async_trait::async_trait;
use regex::Regex;
use rig::{agent::Agent, completion::Prompt, providers::openai};
use std::sync::LazyLock;
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::LLMError;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```json|```$").unwrap_or_else(|e| panic!("invalid fence pattern: {e}"))
});

/// A single-shot text-generation service: one system instruction, one user
/// prompt, one completion back.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str, temperature: f64)
        -> Result<String, LLMError>;
}

/// A tool-calling agent treated as an opaque capability: user text in,
/// final reply text out.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, input: &str) -> Result<String, LLMError>;
}

/// Builds the OpenAI client shared by both programs.
pub fn openai_client(config: &LlmConfig) -> openai::Client {
    match &config.base_url {
        Some(base_url) => openai::Client::from_url(&config.api_key, base_url),
        None => openai::Client::new(&config.api_key),
    }
}

/// Text generation backed by an OpenAI chat model
pub struct OpenAiGenerator {
    model: String,
    client: openai::Client,
}

impl OpenAiGenerator {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            client: openai_client(config),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        temperature: f64,
    ) -> Result<String, LLMError> {
        debug!("Prompt: {}", prompt);

        let agent = self
            .client
            .agent(&self.model)
            .preamble(system)
            .temperature(temperature)
            .build();

        let response = agent
            .prompt(prompt.to_string())
            .await
            .map_err(|e| LLMError::ApiError(format!("OpenAI request failed: {}", e)))?;

        debug!("Response: {}", response);

        Ok(response.trim().to_string())
    }
}

#[async_trait]
impl AgentRunner for Agent<openai::CompletionModel> {
    async fn run(&self, input: &str) -> Result<String, LLMError> {
        self.prompt(input.to_string())
            .await
            .map_err(|e| LLMError::ApiError(format!("Agent request failed: {}", e)))
    }
}

/// Removes Markdown code-fence markers that models like to wrap JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw.trim(), "").trim().to_string()
}
