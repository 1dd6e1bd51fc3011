use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use snippetbox_core::AppError;

use crate::middleware::RequestContext;
use crate::state::AppState;

/// Loads the session named by the request cookie and commits it once the
/// handler has produced a response.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());
    let token = jar
        .get(state.sessions.cookie_name())
        .map(|cookie| cookie.value().to_string());

    let session = state.sessions.load(token.as_deref()).await;
    req.extensions_mut()
        .insert(RequestContext::new(session.clone()));

    let mut response = next.run(req).await;

    if let Some(cookie) = state.sessions.commit(&session).await? {
        let value = HeaderValue::from_str(&cookie.to_string())?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("Cookie"));

    Ok(response)
}
