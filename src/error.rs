use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error type shared by the stores and the HTTP handlers.
///
/// Every variant maps to a JSON body `{ "error": ..., "code": ... }`. None of
/// them are fatal; the caller surfaces them as a transient notice.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or invalid user input.
    #[error("{0}")]
    Validation(String),

    /// A required input for an operation was not supplied.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("unknown tab '{0}'")]
    InvalidTab(String),

    /// A derived figure is undefined for the current inputs.
    #[error("cannot compute {0}: division by zero")]
    DivideByZero(&'static str),

    /// The analyzer answered with an error or an unusable payload.
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// The analyzer kept failing after all retries.
    #[error("analysis unavailable after {attempts} attempts")]
    AnalysisUnavailable { attempts: u32 },

    #[error("analysis was cancelled")]
    AnalysisCancelled,

    #[error("an analysis is already running")]
    AnalysisInProgress,

    /// A background job ended without producing a result.
    #[error("background task failed: {0}")]
    TaskFailed(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::TaskFailed(err.to_string())
    }
}

impl AppError {
    /// True for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::MissingInput(_)
                | AppError::EmptyQuestion
                | AppError::InvalidTab(_)
        )
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) | AppError::MissingInput(_) | AppError::EmptyQuestion => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::InvalidTab(_) => (StatusCode::BAD_REQUEST, "INVALID_TAB"),
            AppError::DivideByZero(_) => (StatusCode::UNPROCESSABLE_ENTITY, "DIVIDE_BY_ZERO"),
            AppError::Analysis(_) => (StatusCode::BAD_GATEWAY, "ANALYSIS_ERROR"),
            AppError::AnalysisUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "ANALYSIS_UNAVAILABLE")
            }
            AppError::AnalysisCancelled => (StatusCode::CONFLICT, "ANALYSIS_CANCELLED"),
            AppError::AnalysisInProgress => (StatusCode::CONFLICT, "ANALYSIS_IN_PROGRESS"),
            AppError::TaskFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = json!({
            "error": self.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
