pub mod analyzer;
mod dto;
pub mod handlers;
pub mod model;
pub mod services;
pub mod session;

use crate::state::AppState;
use axum::Router;

pub use analyzer::{FoodAnalyzer, StubAnalyzer};
pub use model::{AnalyzedFood, ApiKey, ImageUpload};
pub use session::{AnalysisStatus, PhotoAnalysisSession};

pub fn router() -> Router<AppState> {
    handlers::analysis_routes()
}
