mod dto;
pub mod handlers;
pub mod model;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use model::{FoodEntry, MealSlot, NewFoodEntry, NutritionTotals};
pub use services::{FoodEntryStore, FoodLog};

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
