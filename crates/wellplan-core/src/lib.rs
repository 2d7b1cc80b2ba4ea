//! Core contracts for wellplan.
//!
//! This crate defines the plan categories, the typed plan models, the
//! per-category schema definitions and the registry that serves them
//! (together with one style example per category) to the rest of the
//! pipeline.

pub mod category;
pub mod error;
pub mod model;
pub mod registry;
pub mod samples;
pub mod schema;

pub use category::PlanCategory;
pub use error::{Error, Result};
pub use model::{
    Challenge, DailyBlocks, DayEntry, DayMeals, DietPlan, FitnessPlan, LogCategories, Meta,
    PlanContent, RecoveryPlan, ShoppingGroup, SkincareDay, SkincarePlan, WeekBlock, WeeklyMeals,
    WellnessPlan, WorkoutStructure, WEEKDAYS,
};
pub use registry::SchemaRegistry;
pub use schema::{Cardinality, MetaDefaults, SchemaDefinition};

/// Current contract version for plan schemas.
pub const SCHEMA_VERSION: &str = "0.1";
