use serde::Serialize;

use crate::analysis::AnalysisStatus;
use crate::food::{FoodEntry, FoodLog, MealSlot, NutritionTotals};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub totals: NutritionTotals,
    pub calorie_goal: f64,
    pub calories_remaining: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealSection {
    pub meal: MealSlot,
    pub label: &'static str,
    pub entries: Vec<FoodEntry>,
    pub totals: NutritionTotals,
    /// Set when the meal has no entries yet.
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodLogView {
    pub summary: DailySummary,
    pub meals: Vec<MealSection>,
    pub selected_meal: MealSlot,
    pub analysis: AnalysisStatus,
}

pub async fn render(state: &AppState) -> FoodLogView {
    let analysis = state.photo.lock().await.status();
    let log = state.food.read().await;
    build(&log, state.config.macro_goals.calories, analysis)
}

fn build(log: &FoodLog, calorie_goal: f64, analysis: AnalysisStatus) -> FoodLogView {
    let totals = log.store.totals(None);
    let meals = MealSlot::ALL
        .into_iter()
        .map(|meal| {
            let entries: Vec<FoodEntry> = log.store.entries_for_meal(meal).cloned().collect();
            MealSection {
                meal,
                label: meal.label(),
                totals: entries.iter().collect(),
                empty_message: entries
                    .is_empty()
                    .then(|| format!("No food logged for {} yet", meal.label().to_lowercase())),
                entries,
            }
        })
        .collect();

    FoodLogView {
        summary: DailySummary {
            totals,
            calorie_goal,
            calories_remaining: (calorie_goal - totals.calories).max(0.0),
        },
        meals,
        selected_meal: log.selected_meal(),
        analysis,
    }
}
