//! Request interceptors, in the order a request meets them.
//!
//! Global (applied in [`crate::router::with_global_layers`]):
//!
//! 1. [`headers`]: security response headers, on panic responses too
//! 2. [`recover`]: converts handler panics into 500 responses
//! 3. [`crate::logging::logging_middleware`]: request id, status and latency logs
//!
//! followed by a request timeout (408).
//!
//! On every page route:
//!
//! 4. [`session`]: loads the session and commits it after the handler ran
//! 5. [`csrf`]: rejects state-changing requests without the session's CSRF token
//! 6. [`auth::authenticate`]: derives the authenticated user, re-checked against the user store
//!
//! On protected routes only:
//!
//! 7. [`auth::require_authentication`]: redirects anonymous requests to the login page
//!
//! Stages communicate through a [`RequestContext`] request extension, which handlers
//! extract directly.

pub mod auth;
pub mod context;
pub mod csrf;
pub mod headers;
pub mod recover;
pub mod session;

pub use context::RequestContext;
