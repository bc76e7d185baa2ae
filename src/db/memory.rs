//! In-process store used for local development, tests, and benches.

use crate::db::{ExerciseStore, USERNAME_TAKEN};
use crate::error::{AppError, Result};
use crate::models::{Exercise, ExerciseFilter, User};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_user_id: u64,
    users: BTreeMap<u64, User>,
    usernames: HashSet<String>,
    exercises: Vec<Exercise>,
}

/// Memory-backed store with the same semantics as the Firestore backend.
#[derive(Default)]
pub struct MemoryDb {
    inner: RwLock<Inner>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseStore for MemoryDb {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, username: &str) -> Result<User> {
        let mut inner = self.inner.write().await;

        if !inner.usernames.insert(username.to_string()) {
            return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let user = User {
            id: inner.next_user_id,
            username: username.to_string(),
        };
        inner.next_user_id += 1;
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user(&self, id: u64) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn insert_exercise(&self, exercise: &Exercise) -> Result<()> {
        self.inner.write().await.exercises.push(exercise.clone());
        Ok(())
    }

    async fn find_exercises(&self, filter: &ExerciseFilter, limit: u32) -> Result<Vec<Exercise>> {
        let inner = self.inner.read().await;

        let mut matching: Vec<Exercise> = inner
            .exercises
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal dates.
        matching.sort_by_key(|e| e.date);
        matching.truncate(limit as usize);

        Ok(matching)
    }

    async fn shutdown(&self) -> Result<()> {
        let inner = self.inner.read().await;
        tracing::info!(
            users = inner.users.len(),
            exercises = inner.exercises.len(),
            "Discarding in-memory store"
        );
        Ok(())
    }
}
