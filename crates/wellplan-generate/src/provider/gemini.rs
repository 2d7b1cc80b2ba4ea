use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationProvider, ProviderKind};
use crate::errors::ProviderError;
use crate::settings::EndpointSettings;

const KIND: ProviderKind = ProviderKind::Gemini;
const API_KEY_HEADER: &str = "x-goog-api-key";

/// `generateContent` backend.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiReply>,
}

#[derive(Debug, Deserialize)]
struct GeminiReply {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
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
impl GenerationProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, instruction: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: instruction }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        debug!(event = "provider_request", provider = %KIND, model = %self.model, url = %url);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::from_reqwest(KIND, err, self.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ProviderError::from_reqwest(KIND, err, self.timeout))?;

        // Gemini reports a bad key as 400 with API_KEY_INVALID.
        let rejected_key = status == StatusCode::BAD_REQUEST && text.contains("API_KEY_INVALID");
        if rejected_key || status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
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

        let envelope: GeminiResponse =
            serde_json::from_str(&text).map_err(|err| ProviderError::Decode {
                provider: KIND,
                message: err.to_string(),
            })?;

        let joined: String = envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if joined.trim().is_empty() {
            return Err(ProviderError::EmptyResponse { provider: KIND });
        }
        Ok(joined)
    }
}
