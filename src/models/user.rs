use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::ObjectId;

/// A registered account. The password hash stays server-side.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ObjectId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user record ready to be written: the password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

impl User {
    /// Builds the stored record for `new_user`, stamping a fresh id and timestamps.
    pub fn new(new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
