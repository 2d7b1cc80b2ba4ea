use thiserror::Error;
use wellplan_core::PlanCategory;

/// Errors raised while building or applying templates.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template '{name}' failed to compile: {message}")]
    Template { name: String, message: String },
    #[error("no template for '{category}' and no wellness default registered")]
    TemplateNotFound { category: PlanCategory },
    #[error("rendering '{template}' failed: {message}")]
    Render { template: String, message: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
