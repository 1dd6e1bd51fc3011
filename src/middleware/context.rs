use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};

use snippetbox_core::AppError;
use snippetbox_models::UserId;
use snippetbox_session::Session;

/// Per-request state threaded through the middleware chain.
///
/// Inserted by the session middleware; `authenticated_user` is only ever set by
/// the authentication middleware after the user store confirmed the id.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub session: Session,
    pub authenticated_user: Option<UserId>,
}

impl RequestContext {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            authenticated_user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated_user.is_some()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| AppError::internal(anyhow!("request context missing from request")))
    }
}
