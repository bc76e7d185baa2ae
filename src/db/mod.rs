//! Database layer: the store trait and its Firestore and in-memory backends.

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::StoreBackend;
use crate::error::Result;
use crate::models::{Exercise, ExerciseFilter, User};
use async_trait::async_trait;
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const EXERCISES: &str = "exercises";
    /// Username reservations (one document per taken name)
    pub const USERNAMES: &str = "usernames";
    /// Sequence counters for auto-incremented ids
    pub const COUNTERS: &str = "counters";
}

/// Body returned when a username is already registered.
pub const USERNAME_TAKEN: &str = "Username already taken...";

/// Document store used by the services.
///
/// One instance is shared by every request for the lifetime of the process.
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Insert a user with the next sequential id.
    ///
    /// Returns `AppError::Conflict` if the username already exists.
    async fn create_user(&self, username: &str) -> Result<User>;

    /// Get a user by id.
    async fn get_user(&self, id: u64) -> Result<Option<User>>;

    /// All users, ordered by id.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Store an exercise.
    async fn insert_exercise(&self, exercise: &Exercise) -> Result<()>;

    /// Exercises matching `filter`, oldest first, at most `limit` rows.
    async fn find_exercises(&self, filter: &ExerciseFilter, limit: u32) -> Result<Vec<Exercise>>;

    /// Release the connection. Called once after the server stops.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// Open the store selected by configuration.
pub async fn connect(backend: &StoreBackend) -> Result<Arc<dyn ExerciseStore>> {
    match backend {
        StoreBackend::Firestore { project_id } => Ok(Arc::new(FirestoreDb::new(project_id).await?)),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data will not survive a restart");
            Ok(Arc::new(MemoryDb::new()))
        }
    }
}
