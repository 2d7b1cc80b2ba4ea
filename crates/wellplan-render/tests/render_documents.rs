use std::sync::Arc;

use wellplan_core::samples::style_example;
use wellplan_core::{PlanCategory, SchemaRegistry, WEEKDAYS};
use wellplan_plan::{FallbackSynthesizer, Resolver};
use wellplan_render::{PageSettings, Renderer};

fn registry() -> Arc<SchemaRegistry> {
    Arc::new(SchemaRegistry::builtin().expect("builtin registry"))
}

#[test]
fn renders_every_fallback_category() {
    let renderer = Renderer::new().expect("renderer");
    let fallback = FallbackSynthesizer::new(registry());

    for category in PlanCategory::ALL {
        let content = fallback.synthesize(category);
        let document = renderer.render(&content).expect("render");

        assert_eq!(document.category, category);
        assert_eq!(document.template, category.as_str());
        assert!(document.markup.starts_with("<!DOCTYPE html>"));
        assert!(document.markup.contains("<style>"));
        assert!(document.markup.contains("@page { size: A4"));
        assert!(document.markup.contains(&format!(
            "Your Personalized {} Plan",
            category.label()
        )));
        assert!(document.markup.contains("data-source=\"fallback\""));
    }
}

#[test]
fn diet_weekdays_render_in_calendar_order() {
    let renderer = Renderer::new().expect("renderer");
    let resolver = Resolver::new(registry()).expect("resolver");
    let raw = style_example(PlanCategory::Diet).to_value().unwrap().to_string();
    let content = resolver.resolve(&raw, PlanCategory::Diet).expect("resolve");

    let markup = renderer.render(&content).expect("render").markup;
    let positions: Vec<usize> = WEEKDAYS
        .iter()
        .map(|day| {
            markup
                .find(&format!("data-day=\"{day}\""))
                .unwrap_or_else(|| panic!("{day} missing from markup"))
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn skincare_tracker_has_thirty_rows() {
    let renderer = Renderer::new().expect("renderer");
    let content = FallbackSynthesizer::new(registry()).synthesize(PlanCategory::Skincare);
    let markup = renderer.render(&content).expect("render").markup;
    assert_eq!(markup.matches("class=\"day-entry\"").count(), 30);
}

#[test]
fn fitness_weeks_are_numbered_from_one() {
    let renderer = Renderer::new().expect("renderer");
    let content = FallbackSynthesizer::new(registry()).synthesize(PlanCategory::Fitness);
    let markup = renderer.render(&content).expect("render").markup;
    assert!(markup.contains("data-week=\"1\""));
    assert!(markup.contains("data-week=\"4\""));
    assert!(!markup.contains("data-week=\"0\""));
}

#[test]
fn content_is_html_escaped() {
    let renderer = Renderer::new().expect("renderer");
    let resolver = Resolver::new(registry()).expect("resolver");
    let mut value = style_example(PlanCategory::Recovery).to_value().unwrap();
    value["habits"][0] = "<script>alert(1)</script>".into();
    let content = resolver
        .resolve(&value.to_string(), PlanCategory::Recovery)
        .expect("resolve");

    let markup = renderer.render(&content).expect("render").markup;
    assert!(!markup.contains("<script>"));
    assert!(markup.contains("&lt;script&gt;"));
}

#[test]
fn page_settings_flow_into_metadata() {
    let letter = PageSettings {
        format: "Letter",
        width_mm: 215.9,
        height_mm: 279.4,
        margin_mm: 10.0,
    };
    let renderer = Renderer::new().expect("renderer").with_page(letter);
    let content = FallbackSynthesizer::new(registry()).synthesize(PlanCategory::Wellness);
    let document = renderer.render(&content).expect("render");
    assert_eq!(document.page, letter);
    assert_eq!(document.generated_at, content.generated_at());
}
