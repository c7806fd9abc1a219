//! Username/password accounts backed by a [`UserRepository`].
//!
//! Passwords are hashed with Argon2id and stored as PHC strings. Verification
//! re-derives the hash with the stored salt and parameters.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;

use crate::db::{User, UserRepository};
use crate::error::AppError;
use crate::Result;

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns `false` without writing anything if `username` is taken.
    pub async fn create(&self, username: &str, password: &str) -> Result<bool> {
        if self.users.find_user(username).await?.is_some() {
            return Ok(false);
        }
        let user = User::new(username.to_string(), hash_password(password)?);
        self.users.insert_user(&user).await
    }

    pub async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        match self.users.find_user(username).await? {
            Some(user) => verify_password(password, &user.password_hash),
            None => Ok(false),
        }
    }
}
