use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiProviderConfig;
use crate::errors::AiError;

const RESEARCH_SYSTEM_PROMPT: &str = "You are a travel research assistant. Answer with concise, current, factual notes for trip planning: prices, opening hours, seasonal events, closures and safety advisories. No preamble.";

/// Text-in/text-out access to a generative model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiError>;
}

/// Search-augmented model returning free-text findings for a query.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, AiError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints. OpenAI is
/// used for generation and Perplexity for research; both speak this format.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: Client,
    config: AiProviderConfig,
    json_mode: bool,
}

impl ChatCompletionsClient {
    pub fn new(config: AiProviderConfig, timeout: Duration, json_mode: bool) -> Result<Self, AiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            config,
            json_mode,
        })
    }

    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.7,
            response_format: self.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiError> {
        self.chat(system_prompt, user_prompt).await
    }
}

#[async_trait]
impl ResearchProvider for ChatCompletionsClient {
    async fn search(&self, query: &str) -> Result<String, AiError> {
        self.chat(RESEARCH_SYSTEM_PROMPT, query).await
    }
}
