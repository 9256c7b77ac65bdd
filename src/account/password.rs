//! Password hashing and verification.
//!
//! Registration hashes the plaintext with Argon2id and a fresh random salt;
//! the salt and parameters travel inside the PHC string, so nothing is stored
//! separately. Verification parses the stored string and lets the hash
//! function compare, which keeps the comparison independent of how many
//! leading bytes match.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{self, rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

/// Hash a plaintext password with Argon2id. Returns a PHC-format string.
///
/// The default parameters are memory-hard and land in the
/// tens-of-milliseconds range, which is the point: each guess costs the
/// attacker the same work.
///
/// # Errors
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(false)` on mismatch; a malformed stored hash is an error, not
/// a mismatch.
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed or verification
/// fails for a reason other than a wrong password.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("invalid password hash: {e}"))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("password verification failed: {e}")),
    }
}
