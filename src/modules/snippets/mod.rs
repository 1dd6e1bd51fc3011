//! Home page and snippet pages.

pub mod controller;
pub mod model;
pub mod router;
