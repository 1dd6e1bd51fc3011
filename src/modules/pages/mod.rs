//! Static pages and the liveness probe.

pub mod controller;
pub mod router;
