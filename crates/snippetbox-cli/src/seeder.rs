//! Fake data generation for local development.

pub mod models;
pub mod snippets;

pub use models::{SeedConfig, SnippetSeed};
pub use snippets::{clear_snippets, generate_snippets, insert_snippets_batch, seed_snippets};
