use serde::Serialize;

use crate::progress::{CalorieDay, MacroShare, ProgressSnapshot, WeeklyStats, WeightPoint};

#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub weekly: WeeklyStats,
    pub weight_series: Vec<WeightPoint>,
    pub calorie_series: Vec<CalorieDay>,
    pub macro_distribution: Vec<MacroShare>,
    /// Kilograms lost since the first weight point.
    pub weight_change_kg: f64,
}

pub fn render(snapshot: &ProgressSnapshot) -> ProgressView {
    let weight_change_kg = match (snapshot.starting_weight(), snapshot.weight.last()) {
        (Some(first), Some(last)) => ((first - last.weight_kg) * 10.0).round() / 10.0,
        _ => 0.0,
    };
    ProgressView {
        weekly: snapshot.weekly.clone(),
        weight_series: snapshot.weight.clone(),
        calorie_series: snapshot.calories.clone(),
        macro_distribution: snapshot.macro_distribution.clone(),
        weight_change_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_change_is_first_minus_last() {
        let view = render(&ProgressSnapshot::default());
        assert_eq!(view.weight_change_kg, 2.0);
        assert_eq!(view.weight_series.len(), 7);
        assert_eq!(view.calorie_series.len(), 7);
    }
}
