use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::{PredictionRecord, User};
use crate::db::{ResultRepository, UserRepository};
use crate::Result;

#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    results: Vec<PredictionRecord>,
}

/// Process-local store used by tests and `database.backend = "memory"`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<bool> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&user.username) {
            return Ok(false);
        }
        inner.users.insert(user.username.clone(), user.clone());
        Ok(true)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(username).cloned())
    }
}

#[async_trait]
impl ResultRepository for MemoryStore {
    async fn append(&self, username: &str, disease: &str, outcome: &str) -> Result<PredictionRecord> {
        let mut inner = self.inner.write().await;
        let record = PredictionRecord {
            id: inner.results.len() as i64 + 1,
            username: username.to_string(),
            disease: disease.to_string(),
            outcome: outcome.to_string(),
            created_at: Utc::now(),
        };
        inner.results.push(record.clone());
        Ok(record)
    }

    async fn list_for(&self, username: &str) -> Result<Vec<PredictionRecord>> {
        Ok(self
            .inner
            .read()
            .await
            .results
            .iter()
            .filter(|r| r.username == username)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_username_is_not_inserted() {
        let store = MemoryStore::new();
        let first = User::new("alice".into(), "hash-1".into());
        let second = User::new("alice".into(), "hash-2".into());

        assert!(store.insert_user(&first).await.unwrap());
        assert!(!store.insert_user(&second).await.unwrap());

        let stored = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hash-1");
    }

    #[tokio::test]
    async fn test_list_for_keeps_insertion_order_per_user() {
        let store = MemoryStore::new();
        store.append("alice", "Diabetes", "first").await.unwrap();
        store.append("bob", "Diabetes", "other").await.unwrap();
        store.append("alice", "Diabetes", "second").await.unwrap();

        let outcomes: Vec<String> = store
            .list_for("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.outcome)
            .collect();
        assert_eq!(outcomes, vec!["first", "second"]);
        assert!(store.list_for("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.append("alice", "Diabetes", "x").await.unwrap();
        assert_eq!(clone.list_for("alice").await.unwrap().len(), 1);
    }
}
