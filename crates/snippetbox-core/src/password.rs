//! Password hashing with bcrypt.

use bcrypt::{BcryptError, hash, verify};

/// Work factor for stored credentials.
pub const PASSWORD_COST: u32 = 12;

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash_password_with_cost(password, PASSWORD_COST)
}

/// Hashes with an explicit cost. Lower costs are only meant for test doubles.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}
