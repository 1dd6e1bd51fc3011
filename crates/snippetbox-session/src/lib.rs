//! # Snippetbox Session
//!
//! Server-side sessions keyed by an opaque cookie token.
//!
//! - [`SessionManager`] loads a [`Session`] for each request from the cookie token
//!   and commits it back to the [`SessionStore`] once the response is ready.
//! - [`Session`] is a cheap, cloneable handle to the request's session data with
//!   typed get/put/pop operations, token renewal and a per-session CSRF token.
//! - [`MemoryStore`] and [`PostgresStore`] persist session records. Stores only
//!   ever see the SHA-256 hash of a token, never the token itself.
//!
//! # Example
//!
//! ```ignore
//! let manager = SessionManager::new(Arc::new(MemoryStore::new()), &SessionConfig::default());
//!
//! let session = manager.load(cookie_value.as_deref()).await;
//! session.put("flash", "Saved!").await?;
//! if let Some(cookie) = manager.commit(&session).await? {
//!     response.headers_mut().append(SET_COOKIE, cookie.to_string().parse()?);
//! }
//! ```

mod error;
mod manager;
mod memory;
mod postgres;
mod session;
mod store;
pub mod token;

pub use error::SessionError;
pub use manager::SessionManager;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use session::{CSRF_TOKEN_KEY, Session};
pub use store::{Record, SessionStore};
