//! Password hashing and verification
//!
//! Argon2 is CPU-bound, so every call runs on tokio's blocking pool.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::OnceLock;
use thiserror::Error;
use tokio::task;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to parse password hash: {0}")]
    MalformedHash(String),

    #[error("Password task failed: {0}")]
    Task(#[from] task::JoinError),
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn hash_blocking(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();

    Ok(hash)
}

fn verify_blocking(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash a password with Argon2 and a random salt, returning the PHC string
pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = password.to_owned();
    task::spawn_blocking(move || hash_blocking(&password)).await?
}

/// Verify a password against a stored PHC string in constant time
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    task::spawn_blocking(move || verify_blocking(&password, &password_hash)).await?
}

/// Run a verification against a throwaway hash.
///
/// Called when no account matches so an unknown email costs as much as a
/// wrong password.
pub async fn burn_verification(password: &str) {
    let password = password.to_owned();
    let _ = task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.get_or_init(|| hash_blocking("unused-dummy-password").ok())
        {
            let _ = verify_blocking(&password, hash);
        }
    })
    .await;
}
