//! Storage layer for user accounts and prediction history.
//!
//! Two repository traits describe the `users` and `results` collections.
//! [`DbOperations`] backs them with PostgreSQL, [`MemoryStore`] keeps them in
//! process memory for tests and local runs.

pub mod memory;
pub mod models;
pub mod operations;

use async_trait::async_trait;

use crate::Result;

pub use memory::MemoryStore;
pub use models::{PredictionRecord, User};
pub use operations::DbOperations;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user unless the username is taken. Returns `false` on a
    /// duplicate, in which case nothing is written.
    async fn insert_user(&self, user: &User) -> Result<bool>;

    async fn find_user(&self, username: &str) -> Result<Option<User>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn append(&self, username: &str, disease: &str, outcome: &str) -> Result<PredictionRecord>;

    /// All records for `username`, oldest first.
    async fn list_for(&self, username: &str) -> Result<Vec<PredictionRecord>>;
}
