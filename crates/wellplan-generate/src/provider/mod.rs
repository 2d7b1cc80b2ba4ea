//! Text-generation backends behind one call interface.

mod credentials;
mod gemini;
mod openai;
mod table;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{ParseProviderError, ProviderError};

pub use credentials::Credentials;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use table::ProviderTable;

/// A supported generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "gemini")]
    Gemini,
}

impl ProviderKind {
    /// Order in which `auto` selection tries backends.
    pub const PRIORITY: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Environment variable holding the backend's API key.
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Gemini => "gemini-1.5-flash",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ParseProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(ParseProviderError::UnknownProvider(other.to_string())),
        }
    }
}

/// Caller's provider preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderChoice {
    /// First backend with a credential, in [`ProviderKind::PRIORITY`] order.
    #[default]
    Auto,
    /// This backend only; a missing credential is an error.
    Explicit(ProviderKind),
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderChoice::Auto => f.write_str("auto"),
            ProviderChoice::Explicit(kind) => kind.fmt(f),
        }
    }
}

impl FromStr for ProviderChoice {
    type Err = ParseProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("auto") {
            return Ok(ProviderChoice::Auto);
        }
        value.parse().map(ProviderChoice::Explicit)
    }
}

/// One generation backend.
///
/// Implementations submit the instruction once and return the backend's
/// text unmodified. They never retry and never inspect the content.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn model(&self) -> &str;

    async fn generate(&self, instruction: &str) -> Result<String, ProviderError>;
}
