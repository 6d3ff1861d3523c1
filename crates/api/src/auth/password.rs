//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::Argon2;

/// Well-formed Argon2id hash (default parameters) that no password matches.
///
/// Login verifies against it when the email is unknown so both failure paths
/// pay the same hashing cost.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$6ktLrl+D1M3qGToulBPfZA$v8XrQttRHIbdqFAt/mNpLX+bYqD4FeE+v1pBsIddnKs";

/// One-way, salted password hashing capability.
///
/// Verification re-hashes the candidate and compares; a stored hash is never
/// reversed.
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash string suitable for storage.
    fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error>;

    /// Returns `Ok(false)` on mismatch; `Err` only for a malformed stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error>;
}

/// Production hasher: Argon2id with default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        hash_password(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(password, hash)
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
