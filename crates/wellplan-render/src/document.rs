use chrono::{DateTime, Utc};
use serde::Serialize;
use wellplan_core::PlanCategory;
use wellplan_plan::ContentSource;

/// Physical page sizing handed to the PDF converter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSettings {
    pub format: &'static str,
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageSettings {
    pub const A4: PageSettings = PageSettings {
        format: "A4",
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 12.0,
    };
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::A4
    }
}

/// Markup with inlined stylesheet plus the metadata needed to convert it.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub category: PlanCategory,
    /// Template actually used; differs from `category` only on the wellness default.
    pub template: String,
    pub title: String,
    pub source: ContentSource,
    pub generated_at: DateTime<Utc>,
    pub rendered_at: DateTime<Utc>,
    pub page: PageSettings,
    #[serde(skip_serializing)]
    pub markup: String,
}
