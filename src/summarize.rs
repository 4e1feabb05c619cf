//! The summarize module sends one prompt to an LLM model and returns its answer.

use std::str::FromStr;

use anyhow::{Context, Result};
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatProvider};
use log::debug;
use url::Url;

use crate::prompt::PromptTemplate;

/// Configuration containing shared data for summarization operations
pub struct SummarizeContext<'a> {
    /// LLM model to use for summarization
    pub model: &'a dyn ChatProvider,
    /// Prompt template the content is merged into
    pub prompt_template: &'a PromptTemplate,
}

/// Creates an LLM builder from a model URL such as `openai://gpt-4o` or `ollama://8b@llama3`.
///
/// The URL scheme selects the backend, the host is the model name and a
/// non-empty username is appended as a `:tag`.
///
/// # Arguments
///
/// * `model` - Model URL
/// * `temperature` - Sampling temperature, fixed for the whole run
/// * `api_key` - Optional API key for the backend
///
/// # Errors
///
/// Returns an error if:
/// * The model is not a valid URL
/// * The scheme does not name a known backend
/// * The URL has no host to use as model name
pub fn model_builder(model: &str, temperature: f32, api_key: Option<String>) -> Result<LLMBuilder> {
    let model_url = Url::parse(model).map_err(|e| anyhow::anyhow!("Invalid model URL: {}", e))?;
    let backend = LLMBackend::from_str(model_url.scheme())
        .map_err(|e| anyhow::anyhow!("Invalid LLM backend: {}", e))?;
    let name = [
        model_url
            .host_str()
            .context("Specify model name as host URL.")?,
        model_url.username(),
    ]
    .iter()
    .filter(|x| !x.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(":");

    let llm_builder = LLMBuilder::new()
        .backend(backend)
        .model(name)
        .temperature(temperature);

    Ok(match api_key {
        Some(key) => llm_builder.api_key(key),
        None => llm_builder,
    })
}

/// Summarizes `text` with a single completion request.
///
/// The answer is returned as the model produced it; an empty answer is not an error here.
///
/// # Errors
///
/// Returns an error if:
/// * LLM chat operation fails
/// * The response carries no text
pub async fn summarize_text(text: &str, ctx: &SummarizeContext<'_>) -> Result<String> {
    let prompt = ctx.prompt_template.render(text);
    debug!("Sending prompt of {} chars", prompt.len());

    let messages = [ChatMessage::user().content(prompt).build()];

    let response = ctx
        .model
        .chat(&messages)
        .await
        .map_err(|err| anyhow::anyhow!("LLM error: {err}."))?;

    response
        .text()
        .context("LLM response contained no text")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_url_must_be_valid() {
        assert!(model_builder("gpt-4o", 0.5, None).is_err());
        assert!(model_builder("nosuchbackend://gpt-4o", 0.5, None).is_err());
        assert!(model_builder("openai://gpt-4o", 0.5, Some("key".to_owned())).is_ok());
        assert!(model_builder("ollama://8b@llama3", 0.2, None).is_ok());
    }
}
