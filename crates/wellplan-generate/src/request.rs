use std::path::{Path, PathBuf};

use wellplan_core::PlanCategory;

use crate::provider::ProviderChoice;

pub const DEFAULT_TONE: &str = "simple";
pub const DEFAULT_AUDIENCE: &str = "beginner";

/// One document to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub category: PlanCategory,
    pub provider: ProviderChoice,
    pub tone: String,
    pub audience: String,
    /// Where the caller will write the rendered markup.
    pub destination: PathBuf,
}

impl GenerationRequest {
    pub fn new(category: PlanCategory, destination: impl Into<PathBuf>) -> Self {
        Self {
            category,
            provider: ProviderChoice::Auto,
            tone: DEFAULT_TONE.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            destination: destination.into(),
        }
    }

    pub fn with_provider(mut self, provider: ProviderChoice) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}
