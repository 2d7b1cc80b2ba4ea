use std::collections::BTreeMap;

use crate::category::PlanCategory;
use crate::error::{Error, Result};
use crate::model::PlanContent;
use crate::samples::style_example;
use crate::schema::SchemaDefinition;

#[derive(Debug, Clone)]
struct RegistryEntry {
    schema: SchemaDefinition,
    example: PlanContent,
}

/// Read-only lookup of schema definitions and style examples by category.
///
/// Built once at startup and shared (typically behind an `Arc`) by the
/// prompt compiler, resolver and fallback synthesizer.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: BTreeMap<PlanCategory, RegistryEntry>,
}

impl SchemaRegistry {
    /// Registry with the built-in contract for every category.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        for category in PlanCategory::ALL {
            registry.register(SchemaDefinition::for_category(category)?, style_example(category))?;
        }
        Ok(registry)
    }

    /// Add or replace the entry for the schema's category.
    pub fn register(&mut self, schema: SchemaDefinition, example: PlanContent) -> Result<()> {
        if example.category() != schema.category {
            return Err(Error::CategoryMismatch {
                expected: schema.category,
                found: example.category(),
            });
        }
        self.entries
            .insert(schema.category, RegistryEntry { schema, example });
        Ok(())
    }

    pub fn schema(&self, category: PlanCategory) -> Result<&SchemaDefinition> {
        self.entries
            .get(&category)
            .map(|entry| &entry.schema)
            .ok_or(Error::MissingSchema(category))
    }

    pub fn style_example(&self, category: PlanCategory) -> Result<&PlanContent> {
        self.entries
            .get(&category)
            .map(|entry| &entry.example)
            .ok_or(Error::MissingSchema(category))
    }

    pub fn categories(&self) -> impl Iterator<Item = PlanCategory> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registers_every_category() {
        let registry = SchemaRegistry::builtin().unwrap();
        let categories: Vec<_> = registry.categories().collect();
        assert_eq!(categories, PlanCategory::ALL.to_vec());
    }

    #[test]
    fn empty_registry_reports_missing_schema() {
        let registry = SchemaRegistry::default();
        let err = registry.schema(PlanCategory::Recovery).unwrap_err();
        assert!(matches!(err, Error::MissingSchema(PlanCategory::Recovery)));
        assert!(registry.style_example(PlanCategory::Recovery).is_err());
    }

    #[test]
    fn register_rejects_mismatched_example() {
        let mut registry = SchemaRegistry::default();
        let schema = SchemaDefinition::for_category(PlanCategory::Diet).unwrap();
        let err = registry
            .register(schema, style_example(PlanCategory::Fitness))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CategoryMismatch {
                expected: PlanCategory::Diet,
                found: PlanCategory::Fitness
            }
        ));
    }
}
