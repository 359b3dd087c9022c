//! Password hashing using argon2
//!
//! Provides secure password hashing and verification behind the
//! [`PasswordHasher`] and [`PasswordVerifier`] capabilities.
//!
//! Argon2 is intentionally CPU-intensive, so the trait implementations run
//! on tokio's blocking pool.

use crate::repositories::UserRecord;
use anyhow::Result;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Argon2,
};
use async_trait::async_trait;

/// Produces a storable hash for a new user's password
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String>;
}

/// Checks a plaintext password against a stored record
#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    async fn matches(&self, record: &UserRecord, plaintext: &str) -> Result<bool>;
}

/// Argon2id password service
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash_blocking(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a hash (blocking operation)
    pub fn verify_blocking(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[async_trait]
impl PasswordHasher for PasswordService {
    async fn hash(&self, plaintext: &str) -> Result<String> {
        let password = plaintext.to_string();
        tokio::task::spawn_blocking(move || Self::hash_blocking(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}

#[async_trait]
impl PasswordVerifier for PasswordService {
    async fn matches(&self, record: &UserRecord, plaintext: &str) -> Result<bool> {
        let password = plaintext.to_string();
        let hash = record.password_hash.clone();
        tokio::task::spawn_blocking(move || Self::verify_blocking(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
