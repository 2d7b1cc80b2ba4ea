use chrono::{DateTime, Utc};
use serde::Serialize;
use wellplan_core::{PlanCategory, PlanContent};

/// Where validated content came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentSource {
    /// Parsed from a backend response and validated.
    Generated { provider: Option<String> },
    /// Produced locally without any backend call.
    Fallback,
}

/// Plan content that passed the schema gate.
///
/// Only [`crate::Resolver`] and [`crate::FallbackSynthesizer`] can build one,
/// so holding a value is proof that it satisfies its category schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedContent {
    category: PlanCategory,
    plan: PlanContent,
    source: ContentSource,
    generated_at: DateTime<Utc>,
}

impl GeneratedContent {
    pub(crate) fn new(plan: PlanContent, source: ContentSource, generated_at: DateTime<Utc>) -> Self {
        Self {
            category: plan.category(),
            plan,
            source,
            generated_at,
        }
    }

    pub fn category(&self) -> PlanCategory {
        self.category
    }

    pub fn plan(&self) -> &PlanContent {
        &self.plan
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ContentSource::Fallback)
    }

    pub fn title(&self) -> &str {
        &self.plan.meta().title
    }
}
