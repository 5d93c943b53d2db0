//! Daily macro goals against what the food log holds so far.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::config::MacroGoals;
use crate::food::NutritionTotals;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTone {
    Low,
    Fair,
    OnTrack,
}

impl ProgressTone {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 50.0 {
            ProgressTone::Low
        } else if percent < 80.0 {
            ProgressTone::Fair
        } else {
            ProgressTone::OnTrack
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MacroProgress {
    pub name: &'static str,
    pub icon: &'static str,
    pub unit: &'static str,
    pub current: f64,
    pub goal: f64,
    /// Percent of goal, capped at 100.
    pub percent: f64,
    pub remaining: f64,
    pub goal_reached: bool,
    pub tone: ProgressTone,
}

impl MacroProgress {
    fn new(name: &'static str, icon: &'static str, unit: &'static str, current: f64, goal: f64) -> Self {
        let percent = percent_of_goal(current, goal);
        let remaining = (goal - current).max(0.0);
        Self {
            name,
            icon,
            unit,
            current,
            goal,
            percent,
            remaining,
            goal_reached: remaining == 0.0,
            tone: ProgressTone::from_percent(percent),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MacroTrackerView {
    pub macros: Vec<MacroProgress>,
    pub tips: Vec<String>,
}

/// `goal` is positive; the config loader rejects anything else.
pub fn percent_of_goal(current: f64, goal: f64) -> f64 {
    (current / goal * 100.0).min(100.0)
}

pub fn track(goals: &MacroGoals, intake: &NutritionTotals) -> MacroTrackerView {
    let macros = vec![
        MacroProgress::new("Calories", "🔥", "kcal", intake.calories, goals.calories),
        MacroProgress::new("Protein", "💪", "g", intake.protein_g, goals.protein_g),
        MacroProgress::new("Carbohydrates", "🍞", "g", intake.carbs_g, goals.carbs_g),
        MacroProgress::new("Fat", "🥑", "g", intake.fat_g, goals.fat_g),
    ];
    let tips = tips_for(&macros);
    MacroTrackerView { macros, tips }
}

fn tips_for(macros: &[MacroProgress]) -> Vec<String> {
    let mut tips = Vec::new();
    for m in macros {
        match (m.name, m.tone) {
            ("Protein", _) if m.remaining > 0.0 => tips.push(format!(
                "You still need {}g of protein - consider lean fish or chicken",
                m.remaining.round()
            )),
            ("Carbohydrates", ProgressTone::Fair | ProgressTone::OnTrack) => tips.push(
                "Good progress on carbohydrates - add some vegetables for fiber".to_string(),
            ),
            ("Calories", _) if m.goal_reached => {
                tips.push("You have reached your calorie goal for today".to_string())
            }
            ("Calories", ProgressTone::OnTrack) => {
                tips.push("You are on schedule with your calories for today".to_string())
            }
            _ => {}
        }
    }
    tips
}

pub fn router() -> Router<AppState> {
    Router::new().route("/macros", get(get_macros))
}

#[instrument(skip(state))]
pub async fn get_macros(State(state): State<AppState>) -> Json<MacroTrackerView> {
    let intake = state.food.read().await.store.totals(None);
    Json(track(&state.config.macro_goals, &intake))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> NutritionTotals {
        NutritionTotals {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    #[test]
    fn percent_is_capped_at_100() {
        assert_eq!(percent_of_goal(2500.0, 2000.0), 100.0);
        assert_eq!(percent_of_goal(500.0, 2000.0), 25.0);
    }

    #[test]
    fn tone_thresholds() {
        assert_eq!(ProgressTone::from_percent(49.9), ProgressTone::Low);
        assert_eq!(ProgressTone::from_percent(50.0), ProgressTone::Fair);
        assert_eq!(ProgressTone::from_percent(79.9), ProgressTone::Fair);
        assert_eq!(ProgressTone::from_percent(80.0), ProgressTone::OnTrack);
    }

    #[test]
    fn tracks_against_goals() {
        let view = track(&MacroGoals::default(), &intake(1450.0, 95.0, 180.0, 48.0));
        let protein = &view.macros[1];
        assert_eq!(protein.remaining, 55.0);
        assert_eq!(protein.tone, ProgressTone::Fair);
        assert!(!protein.goal_reached);
        assert!(view.tips.iter().any(|t| t.contains("55g of protein")));
    }

    #[test]
    fn remaining_never_negative() {
        let view = track(&MacroGoals::default(), &intake(2600.0, 0.0, 0.0, 70.0));
        let calories = &view.macros[0];
        assert_eq!(calories.remaining, 0.0);
        assert!(calories.goal_reached);
        assert_eq!(calories.percent, 100.0);
        assert_eq!(view.macros[3].remaining, 0.0);
    }
}
