use axum::{Router, middleware, routing::get};

use super::controller::{account_view, password_update, password_update_post};
use crate::middleware::auth::require_authentication;
use crate::state::AppState;

pub fn init_account_router() -> Router<AppState> {
    Router::new()
        .route("/account/view", get(account_view))
        .route(
            "/account/password/update",
            get(password_update).post(password_update_post),
        )
        .route_layer(middleware::from_fn(require_authentication))
}
