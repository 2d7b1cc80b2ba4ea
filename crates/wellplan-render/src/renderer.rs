use std::fmt;

use chrono::Utc;
use handlebars::{Handlebars, handlebars_helper};
use tracing::{info, warn};
use wellplan_core::PlanCategory;
use wellplan_plan::GeneratedContent;

use crate::document::{PageSettings, RenderedDocument};
use crate::errors::{RenderError, Result};
use crate::view::build_context;

const STYLESHEET: &str = include_str!("../templates/styles.css");
const HEAD_PARTIAL: &str = include_str!("../templates/head.hbs");
const DEFAULT_TEMPLATE: PlanCategory = PlanCategory::Wellness;

const BUILTIN_TEMPLATES: [(PlanCategory, &str); 5] = [
    (PlanCategory::Diet, include_str!("../templates/diet.hbs")),
    (PlanCategory::Fitness, include_str!("../templates/fitness.hbs")),
    (PlanCategory::Skincare, include_str!("../templates/skincare.hbs")),
    (PlanCategory::Recovery, include_str!("../templates/recovery.hbs")),
    (PlanCategory::Wellness, include_str!("../templates/wellness.hbs")),
];

handlebars_helper!(inc: |value: u64| value + 1);

/// Compiled templates, one per category, sharing a head partial and stylesheet.
pub struct Renderer {
    registry: Handlebars<'static>,
    page: PageSettings,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut templates: Vec<&String> = self.registry.get_templates().keys().collect();
        templates.sort();
        f.debug_struct("Renderer")
            .field("templates", &templates)
            .field("page", &self.page)
            .finish()
    }
}

impl Renderer {
    /// Renderer with the built-in template for every category.
    pub fn new() -> Result<Self> {
        Self::with_templates(
            BUILTIN_TEMPLATES
                .iter()
                .map(|(category, source)| (category.as_str(), *source)),
        )
    }

    /// Renderer with a custom set of `(category name, template source)` pairs.
    pub fn with_templates<'a>(templates: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_helper("inc", Box::new(inc));
        registry
            .register_partial("head", HEAD_PARTIAL)
            .map_err(|err| RenderError::Template {
                name: "head".to_string(),
                message: err.to_string(),
            })?;

        for (name, source) in templates {
            registry
                .register_template_string(name, source)
                .map_err(|err| RenderError::Template {
                    name: name.to_string(),
                    message: err.to_string(),
                })?;
        }

        Ok(Self {
            registry,
            page: PageSettings::default(),
        })
    }

    pub fn with_page(mut self, page: PageSettings) -> Self {
        self.page = page;
        self
    }

    /// Template name for `category`, defaulting to the wellness template.
    pub fn template_for(&self, category: PlanCategory) -> Result<&'static str> {
        if self.registry.has_template(category.as_str()) {
            return Ok(category.as_str());
        }
        if self.registry.has_template(DEFAULT_TEMPLATE.as_str()) {
            warn!(
                event = "template_defaulted",
                category = %category,
                template = DEFAULT_TEMPLATE.as_str()
            );
            return Ok(DEFAULT_TEMPLATE.as_str());
        }
        Err(RenderError::TemplateNotFound { category })
    }

    /// Render validated content. No validation happens here.
    pub fn render(&self, content: &GeneratedContent) -> Result<RenderedDocument> {
        let category = content.category();
        let template = self.template_for(category)?;
        let context = build_context(content, &self.page, STYLESHEET)?;

        let markup = self
            .registry
            .render(template, &context)
            .map_err(|err| RenderError::Render {
                template: template.to_string(),
                message: err.to_string(),
            })?;

        info!(
            event = "document_rendered",
            category = %category,
            template = template,
            bytes = markup.len()
        );

        Ok(RenderedDocument {
            category,
            template: template.to_string(),
            title: content.title().to_string(),
            source: content.source().clone(),
            generated_at: content.generated_at(),
            rendered_at: Utc::now(),
            page: self.page,
            markup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_cover_every_category() {
        let renderer = Renderer::new().unwrap();
        for category in PlanCategory::ALL {
            assert_eq!(renderer.template_for(category).unwrap(), category.as_str());
        }
    }

    #[test]
    fn missing_template_defaults_to_wellness() {
        let renderer = Renderer::with_templates([("wellness", "{{> head}}</body></html>")]).unwrap();
        assert_eq!(renderer.template_for(PlanCategory::Diet).unwrap(), "wellness");
    }

    #[test]
    fn no_templates_is_a_hard_error() {
        let renderer = Renderer::with_templates(std::iter::empty()).unwrap();
        let err = renderer.template_for(PlanCategory::Fitness).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TemplateNotFound {
                category: PlanCategory::Fitness
            }
        ));
    }

    #[test]
    fn broken_template_fails_to_compile() {
        let err = Renderer::with_templates([("diet", "{{#each plan.days}}")]).unwrap_err();
        assert!(matches!(err, RenderError::Template { name, .. } if name == "diet"));
    }
}
