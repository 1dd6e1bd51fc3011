use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::error;

use snippetbox_core::ErrorDetail;

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Response for a handler panic, used with `CatchPanicLayer::custom`.
///
/// The connection is marked `close` because the panic may have left a partially
/// written response behind. The panic message is only sent when `debug` is set.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>, debug: bool) -> Response {
    let message = panic_message(&*err);
    error!(panic = %message, "Handler panicked");

    let body = if debug {
        format!("Internal Server Error\n\n{message}")
    } else {
        "Internal Server Error".to_string()
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [
            (header::CONNECTION, "close"),
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
        ],
        body,
    )
        .into_response()
}

/// Debug mode only: replaces the body of a server error with its error chain.
pub async fn expose_error_details(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(detail))
}
