use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderKind;

/// Provider-attributed failure of a generation call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider}: no credential found in {}", .provider.credential_var())]
    MissingCredential { provider: ProviderKind },
    #[error("{provider}: credential rejected (status {status}): {body}")]
    Unauthorized {
        provider: ProviderKind,
        status: u16,
        body: String,
    },
    #[error("{provider}: backend returned status {status}: {body}")]
    Status {
        provider: ProviderKind,
        status: u16,
        body: String,
    },
    #[error("{provider}: transport error: {source}")]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider}: no response within {after:?}")]
    Timeout {
        provider: ProviderKind,
        after: Duration,
    },
    #[error("{provider}: response envelope could not be decoded: {message}")]
    Decode {
        provider: ProviderKind,
        message: String,
    },
    #[error("{provider}: response contained no text")]
    EmptyResponse { provider: ProviderKind },
    #[error("{provider}: client setup failed: {message}")]
    Client {
        provider: ProviderKind,
        message: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> ProviderKind {
        match self {
            ProviderError::MissingCredential { provider }
            | ProviderError::Unauthorized { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Transport { provider, .. }
            | ProviderError::Timeout { provider, .. }
            | ProviderError::Decode { provider, .. }
            | ProviderError::EmptyResponse { provider }
            | ProviderError::Client { provider, .. } => *provider,
        }
    }

    /// Stable identifier used in logs and run manifests.
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::MissingCredential { .. } => "missing_credential",
            ProviderError::Unauthorized { .. } => "unauthorized",
            ProviderError::Status { .. } => "provider_status",
            ProviderError::Transport { .. } => "transport",
            ProviderError::Timeout { .. } => "timeout",
            ProviderError::Decode { .. } => "decode",
            ProviderError::EmptyResponse { .. } => "empty_response",
            ProviderError::Client { .. } => "client_setup",
        }
    }

    /// The request URL is stripped so endpoint details never reach logs.
    pub(crate) fn from_reqwest(provider: ProviderKind, err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout {
                provider,
                after: timeout,
            }
        } else {
            ProviderError::Transport {
                provider,
                source: err.without_url(),
            }
        }
    }
}

/// A provider name that names no supported backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseProviderError {
    #[error("unknown provider '{0}' (expected auto, openai or gemini)")]
    UnknownProvider(String),
}

/// Failures that escape the pipeline. Everything else is absorbed by fallback.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("registry error: {0}")]
    Registry(#[from] wellplan_core::Error),
    #[error("resolver setup error: {0}")]
    Plan(#[from] wellplan_plan::PlanError),
    #[error("render error: {0}")]
    Render(#[from] wellplan_render::RenderError),
}
