//! Style examples, one per category.
//!
//! Each example is schema-valid by construction. The prompt compiler embeds
//! them for tone and format calibration and the fallback synthesizer serves
//! them when generation is unavailable.

use crate::category::PlanCategory;
use crate::model::{
    Challenge, DailyBlocks, DayEntry, DayMeals, DietPlan, FitnessPlan, LogCategories, Meta,
    PlanContent, RecoveryPlan, ShoppingGroup, SkincareDay, SkincarePlan, WeekBlock, WeeklyMeals,
    WellnessPlan, WorkoutStructure,
};

/// Build the style example for `category`.
pub fn style_example(category: PlanCategory) -> PlanContent {
    match category {
        PlanCategory::Diet => PlanContent::Diet(diet_example()),
        PlanCategory::Fitness => PlanContent::Fitness(fitness_example()),
        PlanCategory::Skincare => PlanContent::Skincare(skincare_example()),
        PlanCategory::Recovery => PlanContent::Recovery(recovery_example()),
        PlanCategory::Wellness => PlanContent::Wellness(wellness_example()),
    }
}

fn meta(title: &str, duration: &str, kind: &str, difficulty: &str) -> Meta {
    Meta {
        title: title.to_string(),
        duration: Some(duration.to_string()),
        kind: Some(kind.to_string()),
        difficulty: Some(difficulty.to_string()),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn day_meals(breakfast: &str, lunch: &str, dinner: &str, snacks: &str) -> DayMeals {
    DayMeals {
        breakfast: breakfast.to_string(),
        lunch: lunch.to_string(),
        dinner: dinner.to_string(),
        snacks: snacks.to_string(),
    }
}

fn diet_example() -> DietPlan {
    DietPlan {
        meta: meta("Balanced Week Meal Plan", "7 days", "Diet", "easy"),
        overview: "Simple whole-food meals built around protein, vegetables and fiber, \
                   with one batch-cooking session on Sunday."
            .to_string(),
        weekly_plan: WeeklyMeals {
            mon: day_meals(
                "Greek yogurt with berries and oats",
                "Chicken and quinoa bowl",
                "Baked salmon with roasted vegetables",
                "Apple with peanut butter",
            ),
            tue: day_meals(
                "Spinach omelette with wholegrain toast",
                "Lentil soup and side salad",
                "Turkey stir-fry with brown rice",
                "Carrot sticks and hummus",
            ),
            wed: day_meals(
                "Overnight oats with chia",
                "Leftover stir-fry wrap",
                "Bean chili with avocado",
                "Handful of almonds",
            ),
            thu: day_meals(
                "Banana smoothie with spinach",
                "Tuna salad on rye",
                "Grilled chicken with sweet potato",
                "Cottage cheese with pineapple",
            ),
            fri: day_meals(
                "Scrambled eggs and tomatoes",
                "Chickpea and feta salad",
                "Homemade veggie pizza on wholegrain base",
                "Dark chocolate square",
            ),
            sat: day_meals(
                "Wholegrain pancakes with berries",
                "Shrimp tacos with slaw",
                "Beef and vegetable skewers",
                "Popcorn",
            ),
            sun: day_meals(
                "Avocado toast with poached egg",
                "Roast vegetable grain bowl",
                "Batch-cooked chicken curry",
                "Orange slices",
            ),
        },
        shopping_list: vec![
            ShoppingGroup {
                category: "Produce".to_string(),
                items: strings(&["Spinach", "Berries", "Sweet potatoes", "Avocados", "Tomatoes"]),
            },
            ShoppingGroup {
                category: "Protein".to_string(),
                items: strings(&["Chicken breast", "Salmon fillets", "Eggs", "Lentils"]),
            },
            ShoppingGroup {
                category: "Pantry".to_string(),
                items: strings(&["Rolled oats", "Quinoa", "Brown rice", "Chia seeds"]),
            },
        ],
        tips: strings(&[
            "Drink a glass of water with every meal.",
            "Prep vegetables for the week on Sunday.",
        ]),
    }
}

fn fitness_example() -> FitnessPlan {
    let focuses = ["Foundation", "Build", "Strength", "Peak"];
    let weeks = focuses
        .iter()
        .enumerate()
        .map(|(index, focus)| {
            let sets = 2 + index;
            WeekBlock {
                week: format!("Week {}", index + 1),
                focus: focus.to_string(),
                days: vec![
                    training_day("Monday", "Full-body circuit", &format!("{sets} x 12")),
                    training_day("Tuesday", "Brisk walk or easy cycle", "30 min"),
                    training_day("Wednesday", "Lower-body strength", &format!("{sets} x 10")),
                    training_day("Thursday", "Mobility flow", "20 min"),
                    training_day("Friday", "Upper-body strength", &format!("{sets} x 10")),
                    training_day("Saturday", "Intervals", "6 x 1 min"),
                    training_day("Sunday", "Rest and stretch", "15 min"),
                ],
            }
        })
        .collect();

    FitnessPlan {
        meta: meta("Four-Week Starter Strength", "4 weeks", "Fitness", "beginner"),
        weeks,
        structure: WorkoutStructure {
            warmup: strings(&["5 min light cardio", "Dynamic leg swings", "Arm circles"]),
            main: strings(&["Compound lifts", "Accessory supersets"]),
            cooldown: strings(&["Hamstring stretch", "Child's pose", "Box breathing"]),
        },
        log_categories: LogCategories {
            strength: strings(&["Squat load", "Push-up reps"]),
            endurance: strings(&["Walk distance", "Resting heart rate"]),
            flexibility: strings(&["Toe-touch reach", "Hip mobility"]),
        },
    }
}

fn training_day(name: &str, workout: &str, sets_reps: &str) -> DayEntry {
    DayEntry {
        name: name.to_string(),
        workout: workout.to_string(),
        sets_reps: sets_reps.to_string(),
    }
}

fn skincare_example() -> SkincarePlan {
    const FOCUSES: [(&str, &str); 5] = [
        ("Hydration", "Layer a hydrating serum under moisturizer."),
        ("Barrier care", "Skip actives and use a ceramide cream."),
        ("Gentle exfoliation", "Use a mild acid toner in the evening."),
        ("Sun protection", "Reapply SPF at midday."),
        ("Rest", "Cleanse, moisturize and sleep on a clean pillowcase."),
    ];

    let days = (1..=30u32)
        .map(|day| {
            let (focus, task) = FOCUSES[(day as usize - 1) % FOCUSES.len()];
            SkincareDay {
                day,
                focus: focus.to_string(),
                task: task.to_string(),
            }
        })
        .collect();

    SkincarePlan {
        meta: meta("30-Day Glow Routine", "30 days", "Skincare", "easy"),
        morning_routine: strings(&["Gentle cleanser", "Vitamin C serum", "Moisturizer", "SPF 30+"]),
        evening_routine: strings(&["Oil cleanse", "Gentle cleanser", "Night cream"]),
        days,
    }
}

fn recovery_example() -> RecoveryPlan {
    RecoveryPlan {
        meta: meta("Restore and Recharge", "7 days", "Recovery", "gentle"),
        daily_blocks: DailyBlocks {
            morning: strings(&["Hydrate on waking", "10 min mobility", "Sunlight walk"]),
            midday: strings(&["Protein-rich lunch", "5 min breathing break"]),
            evening: strings(&["Foam rolling", "Screen-free hour", "Consistent bedtime"]),
        },
        habits: strings(&[
            "Sleep 7-9 hours",
            "Walk 6,000 steps",
            "Eat two servings of vegetables per meal",
            "Check in with your energy level",
        ]),
    }
}

fn wellness_example() -> WellnessPlan {
    WellnessPlan {
        meta: meta("Mindful Month", "4 weeks", "Wellness", "easy"),
        morning_ritual: strings(&[
            "Glass of water",
            "Three deep breaths",
            "Write one intention",
            "Stretch for five minutes",
        ]),
        days: strings(&[
            "Move", "Nourish", "Connect", "Reflect", "Create", "Explore", "Rest",
        ]),
        challenges: vec![
            challenge("Digital sunset", &["Pick a cutoff time", "Charge your phone outside the bedroom"]),
            challenge("Gratitude log", &["Write three good things daily", "Share one with a friend"]),
            challenge("Hydration streak", &["Carry a bottle", "Refill it twice before lunch"]),
            challenge("Nature minutes", &["Spend 20 minutes outside", "Leave headphones at home"]),
        ],
        affirmations: strings(&[
            "I am allowed to go at my own pace.",
            "Small steps still move me forward.",
            "I take care of myself without guilt.",
        ]),
    }
}

fn challenge(title: &str, steps: &[&str]) -> Challenge {
    Challenge {
        title: title.to_string(),
        steps: strings(steps),
    }
}
