//! Signup, login and logout.
//!
//! Login and logout rotate the session token so a cookie captured before either
//! transition cannot be replayed afterwards.

pub mod controller;
pub mod model;
pub mod router;
