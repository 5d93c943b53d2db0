use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::instrument;

use super::dto::{AnalyzeRequest, ImageSelectedResponse, SelectImageBytesRequest};
use super::model::ImageUpload;
use super::services::{run_analysis, AnalysisReport};
use super::session::AnalysisStatus;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/analysis", get(get_status))
        .route("/analysis/image", post(select_image_multipart).delete(clear_image))
        .route("/analysis/image/bytes", post(select_image_bytes))
        .route("/analysis/run", post(analyze))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip(state))]
pub async fn get_status(State(state): State<AppState>) -> Json<AnalysisStatus> {
    Json(state.photo.lock().await.status())
}

/// POST /analysis/image (multipart, field `file`)
#[instrument(skip(state, mp))]
pub async fn select_image_multipart(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> AppResult<Json<ImageSelectedResponse>> {
    let mut upload = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() == Some("file") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let file_name = field.file_name().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            upload = Some(ImageUpload::new(data, &content_type, file_name)?);
            break;
        }
    }
    let image = upload.ok_or_else(|| AppError::Validation("no image provided".into()))?;
    Ok(Json(select(&state, image).await))
}

/// POST /analysis/image/bytes { image: [..], content_type?: "image/jpeg" }
#[instrument(skip(state, body))]
pub async fn select_image_bytes(
    State(state): State<AppState>,
    Json(body): Json<SelectImageBytesRequest>,
) -> AppResult<Json<ImageSelectedResponse>> {
    let ct = body.content_type.as_deref().unwrap_or("image/jpeg");
    let image = ImageUpload::new(Bytes::from(body.image.into_vec()), ct, body.file_name)?;
    Ok(Json(select(&state, image).await))
}

async fn select(state: &AppState, image: ImageUpload) -> ImageSelectedResponse {
    let info = image.info();
    let cancelled_job = state.photo.lock().await.select_image(image);
    ImageSelectedResponse {
        image: info,
        cancelled_job,
    }
}

#[instrument(skip(state))]
pub async fn clear_image(State(state): State<AppState>) -> StatusCode {
    state.photo.lock().await.clear_image();
    StatusCode::NO_CONTENT
}

#[instrument(skip(state, body))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> AppResult<(StatusCode, Json<AnalysisReport>)> {
    let report = run_analysis(&state, body.api_key).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
