mod dto;
pub mod handlers;
pub mod model;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use model::{ActivityLevel, BmiCategory, Profile, ProfileUpdate, Sex};
pub use services::ProfileModel;

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
