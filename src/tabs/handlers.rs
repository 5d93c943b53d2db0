use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::Tab;
use crate::error::AppResult;
use crate::state::AppState;
use crate::views::{self, View};

#[derive(Debug, Serialize)]
pub struct TabInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct TabsResponse {
    pub active: Tab,
    pub tabs: Vec<TabInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: String,
}

pub fn tab_routes() -> Router<AppState> {
    Router::new()
        .route("/tabs", get(list_tabs))
        .route("/tabs/active", put(select_tab))
        .route("/view", get(active_view))
        .route("/views/:tab", get(tab_view))
}

fn tabs_response(active: Tab) -> TabsResponse {
    TabsResponse {
        active,
        tabs: Tab::ALL
            .into_iter()
            .map(|t| TabInfo {
                id: t.id(),
                label: t.label(),
                active: t == active,
            })
            .collect(),
    }
}

#[instrument(skip(state))]
pub async fn list_tabs(State(state): State<AppState>) -> Json<TabsResponse> {
    let active = state.tabs.read().await.active();
    Json(tabs_response(active))
}

#[instrument(skip(state))]
pub async fn select_tab(
    State(state): State<AppState>,
    Json(body): Json<SelectTabRequest>,
) -> AppResult<Json<TabsResponse>> {
    let active = state.tabs.write().await.select(&body.tab)?;
    Ok(Json(tabs_response(active)))
}

/// Renders whichever tab is active.
#[instrument(skip(state))]
pub async fn active_view(State(state): State<AppState>) -> Json<View> {
    let active = state.tabs.read().await.active();
    Json(views::render(&state, active).await)
}

#[instrument(skip(state))]
pub async fn tab_view(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> AppResult<Json<View>> {
    let tab = tab.parse::<Tab>()?;
    Ok(Json(views::render(&state, tab).await))
}
