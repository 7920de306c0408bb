//! Ollama chat adapter
//!
//! Talks to a local Ollama server over its `/api/chat` endpoint with JSON
//! output mode enabled and streaming disabled.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ModelError;
use crate::prompt::{Message, Prompt};
use crate::LanguageModel;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Connection and sampling settings for one model
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Upper bound for one whole request, including generation
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "phi3:3.8b".to_string(),
            temperature: 0.9,
            timeout: Duration::from_secs(120),
        }
    }
}

pub struct OllamaClient {
    client: Client,
    chat_url: String,
    config: OllamaConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    format: &'a str,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, ModelError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let chat_url = format!("{}/api/chat", config.base_url.trim_end_matches('/'));
        tracing::info!(model = %config.model, url = %chat_url, "language model configured");
        Ok(Self {
            client,
            chat_url,
            config,
        })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    fn chat_request<'a>(&'a self, prompt: &'a Prompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: &prompt.messages,
            stream: false,
            format: "json",
            options: ChatOptions {
                temperature: self.config.temperature,
            },
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout(self.config.timeout)
        } else {
            ModelError::Http(err)
        }
    }
}

impl LanguageModel for OllamaClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn generate(&mut self, prompt: &Prompt) -> Result<String, ModelError> {
        let response = self
            .client
            .post(&self.chat_url)
            .json(&self.chat_request(prompt))
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().map_err(|e| self.transport_error(e))?;
        if chat.message.content.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(chat.message.content)
    }
}

#[cfg(test)]
#[path = "ollama_tests.rs"]
mod ollama_tests;
