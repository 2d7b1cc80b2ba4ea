use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};
use wellplan_core::{PlanCategory, PlanContent, SchemaRegistry};

use crate::content::{ContentSource, GeneratedContent};
use crate::errors::{PlanError, ResolveFailure, ValidationReport};
use crate::extract::extract_json;
use crate::validate::SchemaValidator;

/// Outcome of resolving one backend response.
pub type ValidationOutcome = Result<GeneratedContent, ResolveFailure>;

/// Extracts, validates and finalizes plan content from raw backend text.
#[derive(Debug)]
pub struct Resolver {
    registry: Arc<SchemaRegistry>,
    validator: SchemaValidator,
}

impl Resolver {
    pub fn new(registry: Arc<SchemaRegistry>) -> Result<Self, PlanError> {
        let validator = SchemaValidator::new(&registry)?;
        Ok(Self { registry, validator })
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Resolve raw text with no provider attribution.
    pub fn resolve(&self, raw: &str, category: PlanCategory) -> ValidationOutcome {
        self.resolve_from(raw, category, None)
    }

    /// Resolve raw text returned by `provider`.
    ///
    /// Extraction is attempted once; there are no retries here.
    pub fn resolve_from(
        &self,
        raw: &str,
        category: PlanCategory,
        provider: Option<&str>,
    ) -> ValidationOutcome {
        let value = extract_json(raw).inspect_err(|err| {
            debug!(event = "extraction_failed", category = %category, error = %err);
        })?;
        self.resolve_value(value, category, provider)
    }

    /// Validate an already-parsed value and finalize it.
    pub fn resolve_value(
        &self,
        value: Value,
        category: PlanCategory,
        provider: Option<&str>,
    ) -> ValidationOutcome {
        let report = self.validate(category, &value);
        if !report.is_ok() {
            return Err(ResolveFailure::Violations { category, report });
        }

        let mut plan = PlanContent::from_value(category, value).map_err(|err| {
            ResolveFailure::Shape {
                category,
                message: err.to_string(),
            }
        })?;

        let defaults = self.registry.schema(category)?.meta_defaults;
        let filled = defaults.apply(plan.meta_mut());
        if !filled.is_empty() {
            warn!(
                event = "meta_defaulted",
                category = %category,
                fields = ?filled,
                "backend omitted soft-required metadata"
            );
        }

        let source = ContentSource::Generated {
            provider: provider.map(str::to_string),
        };
        Ok(GeneratedContent::new(plan, source, Utc::now()))
    }

    /// The validation routine shared with fallback self-checks.
    pub fn validate(&self, category: PlanCategory, value: &Value) -> ValidationReport {
        self.validator.validate(category, value)
    }
}
