use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use super::dto::{AskRequest, SetQuestionRequest, SuggestionsResponse};
use super::model::{AdviceEntry, QUICK_QUESTIONS};
use super::services::ask;
use crate::error::AppResult;
use crate::state::AppState;
use crate::views::{self, AdviceView};

pub fn advice_routes() -> Router<AppState> {
    Router::new()
        .route("/advice", get(list_advice))
        .route("/advice/ask", post(ask_question))
        .route("/advice/question", put(set_question))
        .route("/advice/suggestions", get(suggestions))
}

#[instrument(skip(state))]
pub async fn list_advice(State(state): State<AppState>) -> Json<AdviceView> {
    Json(views::advice::render(&*state.advice.read().await))
}

#[instrument(skip(state))]
pub async fn ask_question(
    State(state): State<AppState>,
    body: Option<Json<AskRequest>>,
) -> AppResult<(StatusCode, Json<AdviceEntry>)> {
    let question = body.and_then(|Json(b)| b.question);
    let entry = ask(&state, question.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Sets the pending question, as picking a quick suggestion does.
#[instrument(skip(state))]
pub async fn set_question(
    State(state): State<AppState>,
    Json(body): Json<SetQuestionRequest>,
) -> StatusCode {
    state.advice.write().await.set_question(body.question);
    StatusCode::NO_CONTENT
}

pub async fn suggestions() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: QUICK_QUESTIONS.to_vec(),
    })
}
