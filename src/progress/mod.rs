//! Historical series shown on the progress tab. Read-only sample data.

mod handlers;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeightPoint {
    pub date: &'static str,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalorieDay {
    pub day: &'static str,
    pub target: u32,
    pub actual: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MacroShare {
    pub label: &'static str,
    pub percentage: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyStats {
    pub avg_calories: u32,
    pub current_weight_kg: f64,
    pub goals_achieved: u32,
    pub total_days: u32,
    pub achievement_percent: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressSnapshot {
    pub weight: Vec<WeightPoint>,
    pub calories: Vec<CalorieDay>,
    pub macro_distribution: Vec<MacroShare>,
    pub weekly: WeeklyStats,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        let weight = [
            ("1 Jan", 75.2),
            ("8 Jan", 74.8),
            ("15 Jan", 74.5),
            ("22 Jan", 74.0),
            ("29 Jan", 73.8),
            ("5 Feb", 73.5),
            ("12 Feb", 73.2),
        ]
        .into_iter()
        .map(|(date, weight_kg)| WeightPoint { date, weight_kg })
        .collect();

        let calories: Vec<CalorieDay> = [
            ("Mon", 1850),
            ("Tue", 2100),
            ("Wed", 1950),
            ("Thu", 2050),
            ("Fri", 1900),
            ("Sat", 2200),
            ("Sun", 1800),
        ]
        .into_iter()
        .map(|(day, actual)| CalorieDay {
            day,
            target: 2000,
            actual,
        })
        .collect();

        let macro_distribution = vec![
            MacroShare {
                label: "Protein",
                percentage: 25,
                color: "#3b82f6",
            },
            MacroShare {
                label: "Carbohydrates",
                percentage: 45,
                color: "#f59e0b",
            },
            MacroShare {
                label: "Fat",
                percentage: 30,
                color: "#10b981",
            },
        ];

        let (goals_achieved, total_days) = (5, 7);
        let weekly = WeeklyStats {
            avg_calories: average_actual(&calories),
            current_weight_kg: 73.8,
            goals_achieved,
            total_days,
            achievement_percent: (f64::from(goals_achieved) / f64::from(total_days) * 100.0)
                .round() as u32,
        };

        Self {
            weight,
            calories,
            macro_distribution,
            weekly,
        }
    }
}

fn average_actual(days: &[CalorieDay]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let sum: u32 = days.iter().map(|d| d.actual).sum();
    (f64::from(sum) / days.len() as f64).round() as u32
}

impl ProgressSnapshot {
    /// First recorded weight; the reference point for goal progress.
    pub fn starting_weight(&self) -> Option<f64> {
        self.weight.first().map(|p| p.weight_kg)
    }
}

pub fn router() -> Router<AppState> {
    handlers::progress_routes()
}
