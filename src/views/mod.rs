//! JSON view models, one per tab.
//!
//! Each renderer takes the locks it needs one at a time, in the same order the
//! analysis flow does (photo before food), and never holds two at once.

pub mod advice;
pub mod food_log;
pub mod profile;
pub mod progress;

use serde::Serialize;

use crate::macro_tracker::{self, MacroTrackerView};
use crate::state::AppState;
use crate::tabs::Tab;

pub use advice::AdviceView;
pub use food_log::FoodLogView;
pub use profile::ProfileView;
pub use progress::ProgressView;

#[derive(Debug, Serialize)]
#[serde(tag = "tab", rename_all = "kebab-case")]
pub enum View {
    FoodLog(FoodLogView),
    MacroTracker(MacroTrackerView),
    AiAdvice(AdviceView),
    Progress(ProgressView),
    Profile(ProfileView),
}

pub async fn render(state: &AppState, tab: Tab) -> View {
    match tab {
        Tab::FoodLog => View::FoodLog(food_log::render(state).await),
        Tab::MacroTracker => {
            let totals = state.food.read().await.store.totals(None);
            View::MacroTracker(macro_tracker::track(&state.config.macro_goals, &totals))
        }
        Tab::AiAdvice => View::AiAdvice(advice::render(&*state.advice.read().await)),
        Tab::Progress => View::Progress(progress::render(&state.progress)),
        Tab::Profile => {
            let model = state.profile.read().await;
            View::Profile(profile::render(&model, state.config.baseline_weight_kg))
        }
    }
}
