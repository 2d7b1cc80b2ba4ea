use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::PlanCategory;

/// Weekday keys of a diet plan, in rendering order.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Metadata block shared by every plan category.
///
/// Only `title` is hard-required. The remaining fields are backfilled from
/// category defaults when a backend omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    /// Plan title shown on the cover page.
    pub title: String,
    /// Human-readable plan length (ex.: "4 weeks").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Category label.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Intended difficulty (ex.: "beginner").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl Meta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration: None,
            kind: None,
            difficulty: None,
        }
    }
}

/// Meals for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DayMeals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks: String,
}

/// Exactly seven weekday entries keyed `Mon` through `Sun`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WeeklyMeals {
    #[serde(rename = "Mon")]
    pub mon: DayMeals,
    #[serde(rename = "Tue")]
    pub tue: DayMeals,
    #[serde(rename = "Wed")]
    pub wed: DayMeals,
    #[serde(rename = "Thu")]
    pub thu: DayMeals,
    #[serde(rename = "Fri")]
    pub fri: DayMeals,
    #[serde(rename = "Sat")]
    pub sat: DayMeals,
    #[serde(rename = "Sun")]
    pub sun: DayMeals,
}

impl WeeklyMeals {
    /// Entries in `Mon..Sun` order regardless of how the source was keyed.
    pub fn entries(&self) -> [(&'static str, &DayMeals); 7] {
        [
            (WEEKDAYS[0], &self.mon),
            (WEEKDAYS[1], &self.tue),
            (WEEKDAYS[2], &self.wed),
            (WEEKDAYS[3], &self.thu),
            (WEEKDAYS[4], &self.fri),
            (WEEKDAYS[5], &self.sat),
            (WEEKDAYS[6], &self.sun),
        ]
    }
}

/// Shopping items grouped under one store category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ShoppingGroup {
    pub category: String,
    #[schemars(length(min = 1))]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DietPlan {
    pub meta: Meta,
    pub overview: String,
    pub weekly_plan: WeeklyMeals,
    #[schemars(length(min = 1))]
    pub shopping_list: Vec<ShoppingGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
}

/// One training day inside a week block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DayEntry {
    pub name: String,
    pub workout: String,
    pub sets_reps: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeekBlock {
    pub week: String,
    pub focus: String,
    #[schemars(length(min = 7))]
    pub days: Vec<DayEntry>,
}

/// Session structure applied to every workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkoutStructure {
    #[schemars(length(min = 1))]
    pub warmup: Vec<String>,
    #[schemars(length(min = 1))]
    pub main: Vec<String>,
    #[schemars(length(min = 1))]
    pub cooldown: Vec<String>,
}

/// Progress log columns, grouped by training quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LogCategories {
    #[schemars(length(min = 1))]
    pub strength: Vec<String>,
    #[schemars(length(min = 1))]
    pub endurance: Vec<String>,
    #[schemars(length(min = 1))]
    pub flexibility: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FitnessPlan {
    pub meta: Meta,
    #[schemars(length(min = 4))]
    pub weeks: Vec<WeekBlock>,
    pub structure: WorkoutStructure,
    pub log_categories: LogCategories,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkincareDay {
    pub day: u32,
    pub focus: String,
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkincarePlan {
    pub meta: Meta,
    #[schemars(length(min = 1))]
    pub morning_routine: Vec<String>,
    #[schemars(length(min = 1))]
    pub evening_routine: Vec<String>,
    /// Day index for a 30-day program.
    #[schemars(length(min = 30, max = 30))]
    pub days: Vec<SkincareDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DailyBlocks {
    #[schemars(length(min = 1))]
    pub morning: Vec<String>,
    #[schemars(length(min = 1))]
    pub midday: Vec<String>,
    #[schemars(length(min = 1))]
    pub evening: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecoveryPlan {
    pub meta: Meta,
    pub daily_blocks: DailyBlocks,
    #[schemars(length(min = 1))]
    pub habits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Challenge {
    pub title: String,
    #[schemars(length(min = 1))]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WellnessPlan {
    pub meta: Meta,
    #[schemars(length(min = 1))]
    pub morning_ritual: Vec<String>,
    /// One label per day of the week.
    #[schemars(length(min = 7, max = 7))]
    pub days: Vec<String>,
    #[schemars(length(min = 4))]
    pub challenges: Vec<Challenge>,
    #[schemars(length(min = 1))]
    pub affirmations: Vec<String>,
}

/// A plan of any category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlanContent {
    Diet(DietPlan),
    Fitness(FitnessPlan),
    Skincare(SkincarePlan),
    Recovery(RecoveryPlan),
    Wellness(WellnessPlan),
}

impl PlanContent {
    /// Deserialize a JSON value as the plan model of `category`.
    pub fn from_value(category: PlanCategory, value: Value) -> serde_json::Result<Self> {
        Ok(match category {
            PlanCategory::Diet => PlanContent::Diet(serde_json::from_value(value)?),
            PlanCategory::Fitness => PlanContent::Fitness(serde_json::from_value(value)?),
            PlanCategory::Skincare => PlanContent::Skincare(serde_json::from_value(value)?),
            PlanCategory::Recovery => PlanContent::Recovery(serde_json::from_value(value)?),
            PlanCategory::Wellness => PlanContent::Wellness(serde_json::from_value(value)?),
        })
    }

    pub fn category(&self) -> PlanCategory {
        match self {
            PlanContent::Diet(_) => PlanCategory::Diet,
            PlanContent::Fitness(_) => PlanCategory::Fitness,
            PlanContent::Skincare(_) => PlanCategory::Skincare,
            PlanContent::Recovery(_) => PlanCategory::Recovery,
            PlanContent::Wellness(_) => PlanCategory::Wellness,
        }
    }

    pub fn meta(&self) -> &Meta {
        match self {
            PlanContent::Diet(plan) => &plan.meta,
            PlanContent::Fitness(plan) => &plan.meta,
            PlanContent::Skincare(plan) => &plan.meta,
            PlanContent::Recovery(plan) => &plan.meta,
            PlanContent::Wellness(plan) => &plan.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut Meta {
        match self {
            PlanContent::Diet(plan) => &mut plan.meta,
            PlanContent::Fitness(plan) => &mut plan.meta,
            PlanContent::Skincare(plan) => &mut plan.meta,
            PlanContent::Recovery(plan) => &mut plan.meta,
            PlanContent::Wellness(plan) => &mut plan.meta,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meals(tag: &str) -> Value {
        json!({
            "breakfast": format!("{tag} oats"),
            "lunch": format!("{tag} salad"),
            "dinner": format!("{tag} salmon"),
            "snacks": format!("{tag} almonds")
        })
    }

    #[test]
    fn weekly_entries_follow_weekday_order() {
        let mut week = serde_json::Map::new();
        for day in WEEKDAYS.iter().rev() {
            week.insert(day.to_string(), meals(day));
        }
        let weekly: WeeklyMeals = serde_json::from_value(Value::Object(week)).unwrap();

        let order: Vec<&str> = weekly.entries().iter().map(|(day, _)| *day).collect();
        assert_eq!(order, WEEKDAYS);
        assert_eq!(weekly.entries()[6].1.dinner, "Sun salmon");
    }

    #[test]
    fn weekly_meals_reject_extra_days() {
        let mut week = serde_json::Map::new();
        for day in WEEKDAYS {
            week.insert(day.to_string(), meals(day));
        }
        week.insert("Funday".to_string(), meals("x"));
        assert!(serde_json::from_value::<WeeklyMeals>(Value::Object(week)).is_err());
    }

    #[test]
    fn meta_type_uses_reserved_key() {
        let meta: Meta = serde_json::from_value(json!({
            "title": "Plan",
            "type": "diet"
        }))
        .unwrap();
        assert_eq!(meta.kind.as_deref(), Some("diet"));
        assert!(meta.duration.is_none());

        let encoded = serde_json::to_value(&meta).unwrap();
        assert_eq!(encoded, json!({"title": "Plan", "type": "diet"}));
    }
}
