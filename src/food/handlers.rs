use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::dto::{AddFoodRequest, MealEntriesResponse, SelectMealRequest};
use super::model::{FoodEntry, MealSlot, NewFoodEntry};
use crate::error::AppResult;
use crate::state::AppState;
use crate::views::{self, FoodLogView};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/food", get(food_log).post(add_food))
        .route("/food/meals/:meal", get(meal_entries))
        .route("/food/selected-meal", put(select_meal))
}

#[instrument(skip(state))]
pub async fn food_log(State(state): State<AppState>) -> Json<FoodLogView> {
    Json(views::food_log::render(&state).await)
}

#[instrument(skip(state))]
pub async fn add_food(
    State(state): State<AppState>,
    Json(body): Json<AddFoodRequest>,
) -> AppResult<(StatusCode, Json<FoodEntry>)> {
    let mut log = state.food.write().await;
    let meal = body.meal.unwrap_or_else(|| log.selected_meal());
    let entry = log
        .store
        .add_entry(NewFoodEntry {
            name: body.name,
            calories: body.calories,
            protein_g: body.protein_g,
            carbs_g: body.carbs_g,
            fat_g: body.fat_g,
            portion: body.portion,
            meal,
        })?
        .clone();
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn meal_entries(
    State(state): State<AppState>,
    Path(meal): Path<String>,
) -> AppResult<Json<MealEntriesResponse>> {
    let meal = meal.parse::<MealSlot>()?;
    let log = state.food.read().await;
    Ok(Json(MealEntriesResponse {
        meal,
        entries: log.store.entries_for_meal(meal).cloned().collect(),
        totals: log.store.totals(Some(meal)),
    }))
}

#[instrument(skip(state))]
pub async fn select_meal(
    State(state): State<AppState>,
    Json(body): Json<SelectMealRequest>,
) -> StatusCode {
    state.food.write().await.select_meal(body.meal);
    StatusCode::NO_CONTENT
}
