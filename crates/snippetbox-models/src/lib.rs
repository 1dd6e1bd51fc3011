//! # Snippetbox Models
//!
//! Domain records and the store interfaces the web layer depends on.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed integer IDs
//! - [`users`]: user records and the [`UserStore`] capability
//! - [`snippets`]: snippet records and the [`SnippetStore`] capability
//! - [`errors`]: [`ModelError`], the typed signals stores return
//! - `memory`: in-memory store doubles (feature `test-utils`)
//!
//! Handlers hold stores as `Arc<dyn UserStore>` / `Arc<dyn SnippetStore>`, so the
//! PostgreSQL implementations in `snippetbox-db` and the in-memory doubles are
//! interchangeable at construction time.

pub mod errors;
pub mod ids;
pub mod snippets;
pub mod users;

#[cfg(feature = "test-utils")]
pub mod memory;

// Re-export commonly used types at crate root for convenience
pub use errors::ModelError;
pub use ids::{SnippetId, UserId};
pub use snippets::{Snippet, SnippetStore};
pub use users::{User, UserStore};

#[cfg(feature = "test-utils")]
pub use memory::{MemorySnippetStore, MemoryUserStore};
