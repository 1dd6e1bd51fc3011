use chrono::Utc;
use cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use std::sync::Arc;
use tracing::{debug, warn};

use snippetbox_config::SessionConfig;

use crate::error::SessionError;
use crate::session::{Session, Snapshot, Status};
use crate::store::{Record, SessionStore};
use crate::token::hash_token;

/// Loads sessions from cookie tokens and writes them back after the handler ran.
#[derive(Clone, Debug)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    cookie_name: String,
    lifetime: chrono::Duration,
    secure: bool,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            cookie_name: config.cookie_name.clone(),
            lifetime: chrono::Duration::seconds(config.lifetime_secs),
            secure: config.secure,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Session for the given cookie token.
    ///
    /// Never fails: a missing, unknown or expired token yields a fresh empty
    /// session, and so does a store error (logged).
    pub async fn load(&self, token: Option<&str>) -> Session {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Session::fresh(self.store.clone());
        };

        match self.store.load(&hash_token(token)).await {
            Ok(Some(record)) if !record.is_expired_at(Utc::now()) => {
                Session::new(self.store.clone(), token.to_string(), record.data)
            }
            Ok(_) => {
                debug!("Session token unknown or expired, starting a new session");
                Session::fresh(self.store.clone())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load session, starting a new session");
                Session::fresh(self.store.clone())
            }
        }
    }

    /// Persists a modified session and returns the cookie to send, if any.
    ///
    /// Sessions with data get their expiry pushed out to now + lifetime.
    /// Emptied or destroyed sessions get a removal cookie. Untouched sessions
    /// produce no cookie.
    ///
    /// A session loaded from the store is only ever updated in place. If its
    /// token was renewed or destroyed by a concurrent request, the changes are
    /// dropped and no cookie is sent.
    pub async fn commit(&self, session: &Session) -> Result<Option<Cookie<'static>>, SessionError> {
        let Snapshot {
            token,
            data,
            status,
            stored,
        } = session.snapshot().await;
        let key = hash_token(&token);

        match status {
            Status::Unmodified => Ok(None),
            Status::Modified if !data.is_empty() => {
                let record = Record {
                    data,
                    expires_at: Utc::now() + self.lifetime,
                };
                if !stored {
                    self.store.save(&key, &record).await?;
                } else if !self.store.update(&key, &record).await? {
                    debug!("Session token was revoked during the request, dropping changes");
                    return Ok(None);
                }
                Ok(Some(self.session_cookie(token)))
            }
            Status::Modified => {
                self.store.delete(&key).await?;
                Ok(Some(self.removal_cookie()))
            }
            Status::Destroyed => Ok(Some(self.removal_cookie())),
        }
    }

    fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.lifetime.num_seconds()))
            .build()
    }

    fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}
