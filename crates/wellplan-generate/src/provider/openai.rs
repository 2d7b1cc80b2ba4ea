use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationProvider, ProviderKind};
use crate::errors::ProviderError;
use crate::settings::EndpointSettings;

const KIND: ProviderKind = ProviderKind::OpenAi;

/// Chat-completions backend.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
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
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: &EndpointSettings,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProviderError::Client {
                provider: KIND,
                message: err.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: endpoint.model_or_default(KIND),
            base_url: endpoint.base_url_or_default(KIND),
            timeout,
        })
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, instruction: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: instruction,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(event = "provider_request", provider = %KIND, model = %self.model, url = %url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::from_reqwest(KIND, err, self.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ProviderError::from_reqwest(KIND, err, self.timeout))?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized {
                provider: KIND,
                status: status.as_u16(),
                body: text,
            });
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: KIND,
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: ChatResponse =
            serde_json::from_str(&text).map_err(|err| ProviderError::Decode {
                provider: KIND,
                message: err.to_string(),
            })?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse { provider: KIND })
    }
}
