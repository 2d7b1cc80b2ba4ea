use std::fmt;

use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde::Serialize;
use serde_json::Value;

use crate::category::PlanCategory;
use crate::error::Result;
use crate::model::{DietPlan, FitnessPlan, Meta, RecoveryPlan, SkincarePlan, WellnessPlan};

/// Structural contract for one plan category.
#[derive(Debug, Clone)]
pub struct SchemaDefinition {
    pub category: PlanCategory,
    /// Draft-07 JSON Schema with all subschemas inlined.
    pub document: Value,
    /// Every array length constraint found in `document`.
    pub cardinalities: Vec<Cardinality>,
    pub meta_defaults: MetaDefaults,
}

impl SchemaDefinition {
    /// Build the contract for `category` from its typed plan model.
    pub fn for_category(category: PlanCategory) -> Result<Self> {
        let document = match category {
            PlanCategory::Diet => schema_document::<DietPlan>()?,
            PlanCategory::Fitness => schema_document::<FitnessPlan>()?,
            PlanCategory::Skincare => schema_document::<SkincarePlan>()?,
            PlanCategory::Recovery => schema_document::<RecoveryPlan>()?,
            PlanCategory::Wellness => schema_document::<WellnessPlan>()?,
        };

        let mut cardinalities = Vec::new();
        collect_cardinalities(&document, "", &mut cardinalities);

        Ok(Self {
            category,
            document,
            cardinalities,
            meta_defaults: MetaDefaults::for_category(category),
        })
    }

    /// Top-level fields the schema marks as required.
    pub fn required_fields(&self) -> Vec<&str> {
        self.document
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Cardinality constraint at an exact path, if any.
    pub fn cardinality(&self, path: &str) -> Option<&Cardinality> {
        self.cardinalities.iter().find(|entry| entry.path == path)
    }
}

/// Length constraint on a repeating structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cardinality {
    /// JSON pointer to the array; `*` stands for any array index.
    pub path: String,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "{}: exactly {min} items", self.path),
            (Some(min), Some(max)) => write!(f, "{}: {min} to {max} items", self.path),
            (Some(min), None) => write!(f, "{}: at least {min} items", self.path),
            (None, Some(max)) => write!(f, "{}: at most {max} items", self.path),
            (None, None) => write!(f, "{}: any length", self.path),
        }
    }
}

/// Category-specific values for soft-required metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaDefaults {
    pub kind: &'static str,
    pub duration: &'static str,
    pub difficulty: &'static str,
}

impl MetaDefaults {
    pub fn for_category(category: PlanCategory) -> Self {
        let (duration, difficulty) = match category {
            PlanCategory::Diet => ("7 days", "easy"),
            PlanCategory::Fitness => ("4 weeks", "beginner"),
            PlanCategory::Skincare => ("30 days", "easy"),
            PlanCategory::Recovery => ("7 days", "gentle"),
            PlanCategory::Wellness => ("4 weeks", "easy"),
        };
        Self {
            kind: category.label(),
            duration,
            difficulty,
        }
    }

    /// Fill absent metadata. Returns the names of the fields that were set.
    pub fn apply(&self, meta: &mut Meta) -> Vec<&'static str> {
        let mut filled = Vec::new();
        if meta.kind.is_none() {
            meta.kind = Some(self.kind.to_string());
            filled.push("type");
        }
        if meta.duration.is_none() {
            meta.duration = Some(self.duration.to_string());
            filled.push("duration");
        }
        if meta.difficulty.is_none() {
            meta.difficulty = Some(self.difficulty.to_string());
            filled.push("difficulty");
        }
        filled
    }
}

fn schema_document<T: JsonSchema>() -> Result<Value> {
    let settings = SchemaSettings::draft07().with(|settings| {
        settings.inline_subschemas = true;
    });
    let root = settings.into_generator().into_root_schema_for::<T>();
    Ok(serde_json::to_value(root)?)
}

fn collect_cardinalities(schema: &Value, path: &str, out: &mut Vec<Cardinality>) {
    let Some(object) = schema.as_object() else {
        return;
    };

    let min = object.get("minItems").and_then(Value::as_u64);
    let max = object.get("maxItems").and_then(Value::as_u64);
    if min.is_some() || max.is_some() {
        out.push(Cardinality {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            min,
            max,
        });
    }

    if let Some(properties) = object.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            collect_cardinalities(property, &format!("{path}/{name}"), out);
        }
    }

    if let Some(items) = object.get("items") {
        collect_cardinalities(items, &format!("{path}/*"), out);
    }
}
