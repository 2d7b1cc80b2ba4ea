use serde_json::{Value, json};
use wellplan_core::PlanContent;
use wellplan_plan::GeneratedContent;

use crate::document::PageSettings;
use crate::errors::Result;

/// Template context for one document.
pub(crate) fn build_context(
    content: &GeneratedContent,
    page: &PageSettings,
    stylesheet: &str,
) -> Result<Value> {
    let plan = content.plan();
    let source = if content.is_fallback() { "fallback" } else { "generated" };

    let mut context = json!({
        "title": content.title(),
        "category": content.category().as_str(),
        "category_label": content.category().label(),
        "source": source,
        "meta": serde_json::to_value(plan.meta())?,
        "plan": plan.to_value()?,
        "generated_on": content.generated_at().format("%B %-d, %Y").to_string(),
        "page": serde_json::to_value(page)?,
        "stylesheet": stylesheet,
    });

    // Serialized maps are key-sorted, so weekdays get an explicit ordered view.
    if let PlanContent::Diet(diet) = plan {
        let week: Vec<Value> = diet
            .weekly_plan
            .entries()
            .iter()
            .map(|(day, meals)| json!({ "day": day, "meals": meals }))
            .collect();
        context["week"] = Value::Array(week);
    }

    Ok(context)
}
