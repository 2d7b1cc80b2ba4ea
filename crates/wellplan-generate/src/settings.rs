use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// Default bound on one generation call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Backend configuration, usually read from the `[providers]` TOML table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub timeout_secs: u64,
    pub openai: EndpointSettings,
    pub gemini: EndpointSettings,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            openai: EndpointSettings::default(),
            gemini: EndpointSettings::default(),
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn endpoint(&self, kind: ProviderKind) -> &EndpointSettings {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
        }
    }
}

/// Per-backend overrides. Unset fields use the backend's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl EndpointSettings {
    pub fn model_or_default(&self, kind: ProviderKind) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| kind.default_model().to_string())
    }

    pub fn base_url_or_default(&self, kind: ProviderKind) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| kind.default_base_url().to_string())
    }
}
