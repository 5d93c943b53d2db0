use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::state::AppState;
use crate::views::{self, ProgressView};

pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/progress", get(get_progress))
}

#[instrument(skip(state))]
pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressView> {
    Json(views::progress::render(&state.progress))
}
