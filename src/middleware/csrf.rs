//! CSRF protection bound to the session.
//!
//! Every session carries one token (see `Session::csrf_token`). Pages embed it
//! in a hidden `csrf_token` field; non-form clients may send it in the
//! `X-CSRF-Token` header instead. Any request with an unsafe method must
//! present it, or it is rejected with 400 before reaching the handler.

use anyhow::anyhow;
use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;

use snippetbox_core::AppError;
use snippetbox_session::token::tokens_match;

use crate::middleware::RequestContext;

pub const CSRF_FIELD: &str = "csrf_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Largest form body the guard will buffer, the same as axum's default body limit.
const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

/// Oversized bodies are a 413, other read failures a 400.
fn body_error(err: axum::Error) -> AppError {
    let err = err.into_inner();
    if err.is::<LengthLimitError>() {
        AppError::new(StatusCode::PAYLOAD_TOO_LARGE, anyhow!(err))
    } else {
        AppError::bad_request(anyhow!(err))
    }
}

fn is_safe(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

fn header_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn form_token(body: &[u8]) -> Option<String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
        .ok()?
        .into_iter()
        .find(|(name, _)| name == CSRF_FIELD)
        .map(|(_, value)| value)
}

pub async fn csrf_protect(
    ctx: RequestContext,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_safe(req.method()) {
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES).await.map_err(body_error)?;

    let expected = ctx.session.existing_csrf_token().await;
    let submitted = header_token(&parts.headers).or_else(|| form_token(&bytes));

    match (expected, submitted) {
        (Some(expected), Some(submitted)) if tokens_match(&expected, &submitted) => {}
        (None, _) => {
            return Err(AppError::bad_request(anyhow!(
                "no CSRF token issued for this session"
            )));
        }
        _ => {
            return Err(AppError::bad_request(anyhow!(
                "CSRF token missing or incorrect"
            )));
        }
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}
