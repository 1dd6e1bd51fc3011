use axum::{Router, middleware, routing::get};

use super::controller::{home, snippet_create, snippet_create_post, snippet_view};
use crate::middleware::auth::require_authentication;
use crate::state::AppState;

pub fn init_snippets_router() -> Router<AppState> {
    Router::new()
        .route(
            "/snippet/create",
            get(snippet_create).post(snippet_create_post),
        )
        .route_layer(middleware::from_fn(require_authentication))
        .route("/", get(home))
        .route("/snippet/view/{id}", get(snippet_view))
}
