use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use tracing::instrument;

use super::dto::{EditModeRequest, FieldUpdateRequest};
use super::model::{Profile, ProfileUpdate};
use crate::error::AppResult;
use crate::state::AppState;
use crate::views::{self, ProfileView};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(save_profile))
        .route("/profile/fields", patch(update_field))
        .route("/profile/editing", put(set_editing))
}

async fn render(state: &AppState) -> ProfileView {
    let model = state.profile.read().await;
    views::profile::render(&model, state.config.baseline_weight_kg)
}

#[instrument(skip(state))]
pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileView> {
    Json(render(&state).await)
}

#[instrument(skip(state, body))]
pub async fn save_profile(
    State(state): State<AppState>,
    Json(body): Json<Profile>,
) -> AppResult<Json<ProfileView>> {
    state.profile.write().await.save(body)?;
    Ok(Json(render(&state).await))
}

/// PATCH /profile/fields { field: "age", value: "29" }
#[instrument(skip(state))]
pub async fn update_field(
    State(state): State<AppState>,
    Json(body): Json<FieldUpdateRequest>,
) -> AppResult<Json<ProfileView>> {
    let update = ProfileUpdate::parse(&body.field, &body.value)?;
    state.profile.write().await.update_field(update)?;
    Ok(Json(render(&state).await))
}

#[instrument(skip(state))]
pub async fn set_editing(
    State(state): State<AppState>,
    Json(body): Json<EditModeRequest>,
) -> StatusCode {
    state.profile.write().await.set_editing(body.editing);
    StatusCode::NO_CONTENT
}
