use std::sync::Arc;

use serde_json::{Value, json};
use wellplan_core::samples::style_example;
use wellplan_core::{PlanCategory, SchemaRegistry};
use wellplan_plan::{FallbackSynthesizer, ResolveFailure, Resolver};

fn setup() -> (Resolver, FallbackSynthesizer) {
    let registry = Arc::new(SchemaRegistry::builtin().expect("builtin registry"));
    let resolver = Resolver::new(Arc::clone(&registry)).expect("resolver");
    (resolver, FallbackSynthesizer::new(registry))
}

fn example_json(category: PlanCategory) -> Value {
    style_example(category).to_value().expect("serialize example")
}

#[test]
fn fallback_content_passes_validation_for_every_category() {
    let (resolver, fallback) = setup();
    for category in PlanCategory::ALL {
        let content = fallback.synthesize(category);
        let value = content.plan().to_value().expect("serialize fallback");

        let report = resolver.validate(category, &value);
        assert!(report.is_ok(), "{category} fallback invalid: {:?}", report.issues);

        let resolved = resolver
            .resolve(&value.to_string(), category)
            .expect("fallback resolves");
        assert_eq!(resolved.plan(), content.plan());
    }
}

#[test]
fn malformed_responses_fail_without_panicking() {
    let (resolver, _) = setup();
    let inputs = [
        "",
        "   ",
        "Here is a lovely plan for you, enjoy!",
        "{\"meta\": {\"title\": \"Plan\"}, \"weeks\": [",
        "```json\n{\"meta\": \n```",
        "null",
        "[]",
        "42",
    ];
    for category in PlanCategory::ALL {
        for raw in inputs {
            assert!(
                resolver.resolve(raw, category).is_err(),
                "{category} accepted {raw:?}"
            );
        }
    }
}

#[test]
fn fenced_json_is_extracted_and_validated() {
    let (resolver, _) = setup();
    let body = serde_json::to_string_pretty(&example_json(PlanCategory::Diet)).unwrap();
    let raw = format!("Here you go:\n```json\n{body}\n```\nEnjoy your week!");

    let content = resolver
        .resolve(&raw, PlanCategory::Diet)
        .expect("fenced diet plan resolves");
    assert_eq!(content.category(), PlanCategory::Diet);
}

#[test]
fn fitness_with_three_weeks_fails_on_weeks() {
    let (resolver, _) = setup();
    let mut value = example_json(PlanCategory::Fitness);
    value["weeks"].as_array_mut().unwrap().truncate(3);

    let failure = resolver
        .resolve(&value.to_string(), PlanCategory::Fitness)
        .unwrap_err();
    let report = failure.report().expect("violation report");
    let issue = report
        .issues
        .iter()
        .find(|issue| issue.path == "/weeks")
        .expect("issue at /weeks");
    assert_eq!(issue.code, "min_items");
    assert_eq!(issue.expected, "at least 4 items");
    assert_eq!(issue.actual, "3 items");
}

#[test]
fn short_week_block_fails_on_its_days() {
    let (resolver, _) = setup();
    let mut value = example_json(PlanCategory::Fitness);
    value["weeks"][2]["days"].as_array_mut().unwrap().truncate(5);

    let failure = resolver
        .resolve(&value.to_string(), PlanCategory::Fitness)
        .unwrap_err();
    assert!(failure.report().unwrap().mentions("/weeks/2/days"));
}

#[test]
fn skincare_needs_exactly_thirty_days() {
    let (resolver, _) = setup();
    let mut value = example_json(PlanCategory::Skincare);
    value["days"]
        .as_array_mut()
        .unwrap()
        .push(json!({"day": 31, "focus": "Extra", "task": "Extra"}));

    let failure = resolver
        .resolve(&value.to_string(), PlanCategory::Skincare)
        .unwrap_err();
    let report = failure.report().unwrap();
    assert!(report.issues.iter().any(|issue| issue.code == "max_items" && issue.path == "/days"));
}

#[test]
fn diet_missing_a_weekday_fails() {
    let (resolver, _) = setup();
    let mut value = example_json(PlanCategory::Diet);
    value["weekly_plan"].as_object_mut().unwrap().remove("Thu");

    let failure = resolver
        .resolve(&value.to_string(), PlanCategory::Diet)
        .unwrap_err();
    assert!(failure.report().unwrap().mentions("/weekly_plan/Thu"));
}

#[test]
fn wrong_shape_is_not_coerced() {
    let (resolver, _) = setup();
    let diet = example_json(PlanCategory::Diet).to_string();

    let failure = resolver.resolve(&diet, PlanCategory::Fitness).unwrap_err();
    let ResolveFailure::Violations { category, report } = failure else {
        panic!("expected schema violations");
    };
    assert_eq!(category, PlanCategory::Fitness);
    assert!(report.mentions("/weeks"));
    assert!(report.mentions("/structure"));
}

#[test]
fn extraction_failures_are_reported_as_such() {
    let (resolver, _) = setup();
    let failure = resolver
        .resolve("no json at all", PlanCategory::Wellness)
        .unwrap_err();
    assert_eq!(failure.code(), "extraction_failed");
}
