use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;

use crate::error::AppError;

/// Hash a plaintext password with Argon2id and a random salt.
///
/// Returns the PHC-format string (`$argon2id$v=19$...`), which embeds the salt and
/// parameters needed for verification.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHashError(e.to_string()))
}

/// Check a plaintext password against a stored PHC hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hashed).map_err(|e| AppError::PasswordHashError(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
