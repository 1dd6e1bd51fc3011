use axum::{Router, middleware, routing::get};
use std::any::Any;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, timeout::TimeoutLayer};

use snippetbox_config::ServerConfig;

use crate::logging::logging_middleware;
use crate::middleware::auth::authenticate;
use crate::middleware::csrf::csrf_protect;
use crate::middleware::headers::with_security_headers;
use crate::middleware::recover::{expose_error_details, handle_panic};
use crate::middleware::session::session_middleware;
use crate::modules::account::router::init_account_router;
use crate::modules::pages::controller::{not_found, ping};
use crate::modules::pages::router::init_pages_router;
use crate::modules::snippets::router::init_snippets_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let config = state.config.clone();

    // Page routes: session -> CSRF -> authentication, outermost first.
    let pages = Router::new()
        .merge(init_snippets_router())
        .merge(init_users_router())
        .merge(init_account_router())
        .merge(init_pages_router())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    session_middleware,
                ))
                .layer(middleware::from_fn(csrf_protect))
                .layer(middleware::from_fn_with_state(state.clone(), authenticate)),
        );

    let router = Router::new()
        .merge(pages)
        .route("/ping", get(ping))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .fallback(not_found)
        .with_state(state);

    with_global_layers(router, &config)
}

/// Wraps a fully built router in the layers every response passes through,
/// outermost first: security headers, panic recovery, request logging and the
/// request timeout. In debug mode 5xx bodies are replaced by the underlying
/// error chain.
pub fn with_global_layers(router: Router, config: &ServerConfig) -> Router {
    let debug = config.debug;
    let router = if debug {
        router.layer(middleware::from_fn(expose_error_details))
    } else {
        router
    };

    let router = router.layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(
                move |err: Box<dyn Any + Send + 'static>| handle_panic(err, debug),
            ))
            .layer(middleware::from_fn(logging_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            ))),
    );

    with_security_headers(router)
}
