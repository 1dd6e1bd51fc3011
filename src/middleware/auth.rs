use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use snippetbox_core::AppError;
use snippetbox_models::UserId;

use crate::middleware::RequestContext;
use crate::state::AppState;

/// Session key holding the id of the logged-in user.
pub const AUTHENTICATED_USER_KEY: &str = "authenticatedUserID";

/// Session key holding the path a gated request wanted before being sent to login.
pub const REDIRECT_AFTER_LOGIN_KEY: &str = "redirectPathAfterLogin";

pub const LOGIN_PATH: &str = "/user/login";

/// Marks the request authenticated if the session names a user that still exists.
///
/// A stale id (user deleted) is cleared from the session and the request
/// continues anonymously. A store failure fails the request instead of
/// silently logging the user out.
pub async fn authenticate(
    State(state): State<AppState>,
    ctx: RequestContext,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(id) = ctx
        .session
        .get_int(AUTHENTICATED_USER_KEY)
        .await
        .map(UserId::from)
    {
        if state.users.exists(id).await? {
            if let Some(ctx) = req.extensions_mut().get_mut::<RequestContext>() {
                ctx.authenticated_user = Some(id);
            }
        } else {
            debug!(user_id = %id, "Session refers to a missing user, clearing it");
            ctx.session.remove(AUTHENTICATED_USER_KEY).await;
        }
    }

    Ok(next.run(req).await)
}

/// Gate for pages that need a logged-in user.
///
/// Anonymous requests are redirected to the login page with the requested
/// path remembered for after login. Authenticated responses are marked
/// `Cache-Control: no-store`.
pub async fn require_authentication(
    ctx: RequestContext,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !ctx.is_authenticated() {
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());
        ctx.session.put(REDIRECT_AFTER_LOGIN_KEY, target).await?;

        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

/// Post-login destination: a remembered local path, or the default landing page.
pub fn safe_redirect_target(target: Option<String>, default: &str) -> String {
    match target {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_local_paths_are_followed() {
        let default = "/snippet/create";
        assert_eq!(
            safe_redirect_target(Some("/account/view?tab=1".into()), default),
            "/account/view?tab=1"
        );
        assert_eq!(safe_redirect_target(None, default), default);
        assert_eq!(
            safe_redirect_target(Some("//evil.example".into()), default),
            default
        );
        assert_eq!(
            safe_redirect_target(Some("https://evil.example".into()), default),
            default
        );
        assert_eq!(
            safe_redirect_target(Some("/\\evil.example".into()), default),
            default
        );
    }
}
