mod dto;
pub mod handlers;
pub mod model;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use model::{AdviceCategory, AdviceEntry};
pub use services::{AdviceGenerator, AdviceStore, TemplateAdvisor};

pub fn router() -> Router<AppState> {
    handlers::advice_routes()
}
