//! # Snippetbox Core
//!
//! Core types, errors, and utilities shared by every Snippetbox crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use snippetbox_core::errors::AppError;
//! use snippetbox_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("snippet 42 does not exist"));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorDetail};
pub use password::{hash_password, verify_password};
