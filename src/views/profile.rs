use serde::Serialize;
use tracing::warn;

use crate::error::AppError;
use crate::profile::{BmiCategory, Profile, ProfileModel};

#[derive(Debug, Clone, Serialize)]
pub struct HealthStats {
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub bmi_label: Option<&'static str>,
    pub daily_calorie_target: i64,
    pub goal_progress_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub profile: Profile,
    pub editing: bool,
    pub stats: HealthStats,
    /// Stats that could not be computed, with the reason.
    pub notices: Vec<String>,
}

pub fn render(model: &ProfileModel, baseline_weight_kg: f64) -> ProfileView {
    let profile = model.profile();
    let mut notices = Vec::new();

    let bmi = keep(profile.bmi(), &mut notices);
    let goal_progress = keep(profile.goal_progress_percent(baseline_weight_kg), &mut notices)
        .map(f64::round);
    let category = bmi.map(BmiCategory::from_bmi);

    ProfileView {
        profile: profile.clone(),
        editing: model.is_editing(),
        stats: HealthStats {
            bmi,
            bmi_category: category,
            bmi_label: category.map(BmiCategory::label),
            daily_calorie_target: profile.daily_calorie_target(),
            goal_progress_percent: goal_progress,
        },
        notices,
    }
}

fn keep(result: Result<f64, AppError>, notices: &mut Vec<String>) -> Option<f64> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "profile stat unavailable");
            notices.push(e.to_string());
            None
        }
    }
}
