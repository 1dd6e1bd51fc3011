//! # Snippetbox CLI
//!
//! Administrative and seeding utilities for Snippetbox development.
//!
//! ## Usage
//!
//! ```ignore
//! use snippetbox_cli::seeder::{SeedConfig, seed_snippets};
//!
//! seed_snippets(&pool, SeedConfig::new(50)).await?;
//! ```

pub mod seeder;
