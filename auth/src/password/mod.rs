//! Argon2id password hashing.

mod errors;
mod hasher;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
