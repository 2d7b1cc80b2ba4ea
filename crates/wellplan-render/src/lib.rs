//! Document rendering for validated plans.
//!
//! Selects a handlebars template by category, feeds it the validated content
//! and inlines the shared stylesheet, producing markup ready for PDF
//! conversion by an external tool.

pub mod document;
pub mod errors;
pub mod renderer;
mod view;

pub use document::{PageSettings, RenderedDocument};
pub use errors::{RenderError, Result};
pub use renderer::Renderer;
