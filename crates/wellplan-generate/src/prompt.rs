use std::fmt::Write as _;
use std::sync::Arc;

use wellplan_core::{PlanCategory, SchemaRegistry, WEEKDAYS};

/// Builds the single instruction sent to a generation backend.
///
/// Output depends only on the registry contents and the arguments, so the
/// same inputs always yield the same bytes.
#[derive(Debug, Clone)]
pub struct PromptCompiler {
    registry: Arc<SchemaRegistry>,
}

impl PromptCompiler {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    pub fn compile(
        &self,
        category: PlanCategory,
        tone: &str,
        audience: &str,
    ) -> wellplan_core::Result<String> {
        let schema = self.registry.schema(category)?;
        let example = self.registry.style_example(category)?;
        let schema_json = serde_json::to_string_pretty(&schema.document)?;
        let example_json = serde_json::to_string_pretty(example)?;

        let mut prompt = String::new();
        // Writes into a String cannot fail.
        let _ = writeln!(
            prompt,
            "You are writing a {label} plan for a {audience} audience in a {tone} tone.",
            label = category.label().to_lowercase(),
        );
        let _ = writeln!(
            prompt,
            "Return one JSON object that validates against the JSON Schema below.\n"
        );

        prompt.push_str("RULES:\n");
        prompt.push_str("- Respond with JSON only: no prose, no markdown, no code fences.\n");
        prompt.push_str("- Every array must satisfy its minimum and maximum length.\n");
        prompt.push_str("- Do not add fields that are not in the schema.\n");
        prompt.push_str("- meta.title is required; also fill meta.type, meta.duration and meta.difficulty.\n");
        if let Some(note) = category_note(category) {
            let _ = writeln!(prompt, "- {note}");
        }

        prompt.push_str("\nREQUIRED TOP-LEVEL FIELDS: ");
        prompt.push_str(&schema.required_fields().join(", "));
        prompt.push('\n');

        if !schema.cardinalities.is_empty() {
            prompt.push_str("\nLENGTH CONSTRAINTS (`*` is any array index):\n");
            for cardinality in &schema.cardinalities {
                let _ = writeln!(prompt, "- {cardinality}");
            }
        }

        let _ = write!(
            prompt,
            "\nSCHEMA:\n{schema_json}\n\nSTYLE EXAMPLE (match its level of detail, not its wording):\n{example_json}\n"
        );

        Ok(prompt)
    }
}

fn category_note(category: PlanCategory) -> Option<String> {
    match category {
        PlanCategory::Diet => Some(format!(
            "weekly_plan must have exactly these keys: {}.",
            WEEKDAYS.join(", ")
        )),
        PlanCategory::Fitness => {
            Some("Provide at least 4 weeks, each with at least 7 days.".to_string())
        }
        PlanCategory::Skincare => {
            Some("days must list day 1 through day 30, one entry per day.".to_string())
        }
        PlanCategory::Wellness => Some(
            "days has exactly 7 labels; provide at least 4 challenges.".to_string(),
        ),
        PlanCategory::Recovery => None,
    }
}
