use std::collections::BTreeMap;
use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{JSONSchema, ValidationError};
use serde_json::Value;
use wellplan_core::{PlanCategory, SchemaRegistry};

use crate::errors::{PlanError, ValidationIssue, ValidationReport};

struct CompiledSchema {
    document: Value,
    compiled: JSONSchema,
}

/// JSON Schema validators compiled once per category.
pub struct SchemaValidator {
    schemas: BTreeMap<PlanCategory, CompiledSchema>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("categories", &self.schemas.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaValidator {
    /// Compile the schema of every category in the registry.
    pub fn new(registry: &SchemaRegistry) -> Result<Self, PlanError> {
        let mut schemas = BTreeMap::new();
        for category in registry.categories() {
            let document = registry.schema(category)?.document.clone();
            let compiled = JSONSchema::compile(&document).map_err(|err| PlanError::Schema {
                category,
                message: err.to_string(),
            })?;
            schemas.insert(category, CompiledSchema { document, compiled });
        }
        Ok(Self { schemas })
    }

    /// Validate `instance` against the schema of `category`.
    ///
    /// Every violation is reported; validation never stops at the first one.
    pub fn validate(&self, category: PlanCategory, instance: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(schema) = self.schemas.get(&category) else {
            report.push(ValidationIssue::new(
                "unknown_schema",
                "/",
                format!("a registered {category} schema"),
                "none",
                format!("no compiled schema for category '{category}'"),
            ));
            return report;
        };

        if let Err(errors) = schema.compiled.validate(instance) {
            for error in errors {
                report.push(issue_from_error(&schema.document, &error));
            }
        }

        report
    }
}

fn issue_from_error(document: &Value, error: &ValidationError<'_>) -> ValidationIssue {
    let path = normalized_json_pointer(&error.instance_path.to_string());
    let actual = describe_value(&error.instance);
    let message = error.to_string();

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property.as_str().map(str::to_string).unwrap_or_else(|| property.to_string());
            let field_path = if path == "/" {
                format!("/{name}")
            } else {
                format!("{path}/{name}")
            };
            ValidationIssue::new(
                "missing_field",
                field_path,
                format!("required field '{name}'"),
                "absent",
                message,
            )
        }
        ValidationErrorKind::MinItems { limit } => ValidationIssue::new(
            "min_items",
            path,
            format!("at least {limit} items"),
            actual,
            message,
        ),
        ValidationErrorKind::MaxItems { limit } => ValidationIssue::new(
            "max_items",
            path,
            format!("at most {limit} items"),
            actual,
            message,
        ),
        ValidationErrorKind::Type { .. } => {
            let expected = document
                .pointer(&error.schema_path.to_string())
                .map(|declared| format!("type {declared}"))
                .unwrap_or_else(|| "declared type".to_string());
            ValidationIssue::new("type_mismatch", path, expected, actual, message)
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => ValidationIssue::new(
            "unexpected_field",
            path,
            "no fields outside the schema",
            unexpected.join(", "),
            message,
        ),
        _ => ValidationIssue::new("schema_violation", path, "schema-conformant value", actual, message),
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => format!("boolean {flag}"),
        Value::Number(number) => format!("number {number}"),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("{} items", items.len()),
        Value::Object(fields) => format!("object with {} fields", fields.len()),
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
