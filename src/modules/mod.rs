//! Feature modules. Each has a `controller.rs` with handlers, a `router.rs`
//! building its routes, and where it accepts forms a `model.rs` with them.

pub mod account;
pub mod pages;
pub mod snippets;
pub mod users;
