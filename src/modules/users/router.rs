use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{
    user_login, user_login_post, user_logout_post, user_signup, user_signup_post,
};
use crate::middleware::auth::require_authentication;
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/user/logout", post(user_logout_post))
        .route_layer(middleware::from_fn(require_authentication))
        .route("/user/signup", get(user_signup).post(user_signup_post))
        .route("/user/login", get(user_login).post(user_login_post))
}
