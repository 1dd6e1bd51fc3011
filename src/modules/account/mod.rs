//! Account page and password change. Every route here requires a logged-in user.

pub mod controller;
pub mod model;
pub mod router;
