use std::sync::Arc;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::store::UserRepository;

/// A signup that has passed validation; `password` is still the raw secret.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Owns user identities and their bcrypt password hashes.
///
/// Hashing is an explicit step of `register`: the raw password is hashed exactly once,
/// before the record is written, and never reaches the repository.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    cost: u32,
}

impl CredentialStore {
    /// `cost` is the bcrypt work factor used for every new hash.
    pub fn new(users: Arc<dyn UserRepository>, cost: u32) -> Self {
        Self { users, cost }
    }

    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        // Fast path only; the repository's uniqueness check is authoritative.
        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password_blocking(registration.password, self.cost).await?;
        self.users
            .create(NewUser {
                email: registration.email,
                first_name: registration.first_name,
                last_name: registration.last_name,
                password_hash,
            })
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_email(email).await
    }

    /// Whether `email` belongs to an account whose password is `raw_password`.
    /// An unknown email is simply `false`.
    pub async fn verify(&self, email: &str, raw_password: &str) -> Result<bool, AppError> {
        match self.users.find_by_email(email).await? {
            Some(user) => self.verify_user(&user, raw_password).await,
            None => Ok(false),
        }
    }

    /// Whether `raw_password` matches the stored hash of an already loaded `user`.
    pub async fn verify_user(&self, user: &User, raw_password: &str) -> Result<bool, AppError> {
        verify_password_blocking(raw_password.to_string(), user.password_hash.clone()).await
    }
}
