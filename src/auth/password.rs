//! Argon2id password hashing
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=65536,t=1,p=4$salt$hash`),
//! so the salt and parameters travel with the hash.

use argon2::password_hash::{
    self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{Error, Result};

const MEMORY_KIB: u32 = 64 * 1024;
const ITERATIONS: u32 = 1;
const PARALLELISM: u32 = 4;
const OUTPUT_LEN: usize = 32;

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|_| Error::HashingPassword)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            Error::HashingPassword
        })
}

/// Check a candidate password against a stored hash.
///
/// The digest comparison inside `verify_password` is constant-time.
pub fn verify_password(stored_hash: &str, provided: &str) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| Error::InvalidEncodedHashFormat)?;

    hasher()?
        .verify_password(provided.as_bytes(), &parsed)
        .map_err(|e| match e {
            password_hash::Error::Password => Error::IncorrectPassword,
            _ => Error::InvalidEncodedHashFormat,
        })
}
