use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use wellplan_core::samples::style_example;
use wellplan_core::schema::MetaDefaults;
use wellplan_core::{PlanCategory, SchemaRegistry};

use crate::content::{ContentSource, GeneratedContent};

/// Produces schema-valid content with no backend call.
#[derive(Debug, Clone)]
pub struct FallbackSynthesizer {
    registry: Arc<SchemaRegistry>,
}

impl FallbackSynthesizer {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Registered style example with a personalized title. Never fails.
    pub fn synthesize(&self, category: PlanCategory) -> GeneratedContent {
        let mut plan = self
            .registry
            .style_example(category)
            .cloned()
            .unwrap_or_else(|_| style_example(category));
        let defaults = self
            .registry
            .schema(category)
            .map(|schema| schema.meta_defaults)
            .unwrap_or_else(|_| MetaDefaults::for_category(category));

        let meta = plan.meta_mut();
        meta.title = personalized_title(category);
        defaults.apply(meta);

        info!(event = "fallback_synthesized", category = %category);
        GeneratedContent::new(plan, ContentSource::Fallback, Utc::now())
    }
}

fn personalized_title(category: PlanCategory) -> String {
    format!("Your Personalized {} Plan", category.label())
}
