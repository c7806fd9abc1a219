use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// One stored diagnosis. `username` is not a foreign key into `users`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PredictionRecord {
    pub id: i64,
    pub username: String,
    pub disease: String,
    pub outcome: String,
    pub created_at: DateTime<Utc>,
}
