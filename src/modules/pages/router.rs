use axum::{Router, routing::get};

use super::controller::about;
use crate::state::AppState;

pub fn init_pages_router() -> Router<AppState> {
    Router::new().route("/about", get(about))
}
