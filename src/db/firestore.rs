// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (sequential ids, unique usernames)
//! - Exercises (per-user entries queried by date range)
//!
//! Firestore has neither unique indexes nor auto-increment, so both are
//! built from create-only document writes:
//! - `usernames/name:<urlencoded>` reserves a username
//! - `users/<id>` is created at the next free id, starting from `counters/users`

use crate::db::{collections, ExerciseStore, USERNAME_TAKEN};
use crate::error::AppError;
use crate::models::{Exercise, ExerciseFilter, User};
use crate::time_utils::format_utc_rfc3339;
use async_trait::async_trait;
use firestore::errors::FirestoreError;
use serde::{Deserialize, Serialize};

/// Counter document for user ids.
const USER_COUNTER: &str = "users";
/// Upper bound on ids probed when concurrent signups race for the same id.
const MAX_ID_ATTEMPTS: u64 = 32;

/// Sequence counter stored in `counters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Counter {
    /// Next id to hand out
    seq: u64,
}

/// Username reservation stored in `usernames`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UsernameClaim {
    username: String,
    claimed_at: String,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── Username Reservations ───────────────────────────────────

    /// Reserve a username. Fails with `Conflict` if it is already taken.
    async fn claim_username(&self, username: &str) -> Result<(), AppError> {
        let claim = UsernameClaim {
            username: username.to_string(),
            claimed_at: format_utc_rfc3339(chrono::Utc::now()),
        };

        let result: Result<UsernameClaim, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USERNAMES)
            .document_id(username_doc_id(username))
            .object(&claim)
            .execute()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(FirestoreError::DataConflictError(_)) => {
                tracing::debug!(username, "Username already claimed");
                Err(AppError::Conflict(USERNAME_TAKEN.to_string()))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Drop a reservation after a failed signup.
    async fn release_username(&self, username: &str) {
        let result = self
            .client
            .fluent()
            .delete()
            .from(collections::USERNAMES)
            .document_id(username_doc_id(username))
            .execute()
            .await;

        if let Err(e) = result {
            tracing::warn!(username, error = %e, "Failed to release username claim");
        }
    }

    // ─── Id Allocation ───────────────────────────────────────────

    async fn next_user_id(&self) -> Result<u64, AppError> {
        let counter: Option<Counter> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::COUNTERS)
            .obj()
            .one(USER_COUNTER)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(counter.map(|c| c.seq).unwrap_or(0))
    }

    async fn advance_user_counter(&self, seq: u64) -> Result<(), AppError> {
        let _: Counter = self
            .client
            .fluent()
            .update()
            .in_col(collections::COUNTERS)
            .document_id(USER_COUNTER)
            .object(&Counter { seq })
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Create `users/<id>` at the first free id at or after the counter.
    async fn insert_user_at_next_id(&self, username: &str) -> Result<User, AppError> {
        let start = self.next_user_id().await?;

        for id in start..start + MAX_ID_ATTEMPTS {
            let user = User {
                id,
                username: username.to_string(),
            };

            let result: Result<User, FirestoreError> = self
                .client
                .fluent()
                .insert()
                .into(collections::USERS)
                .document_id(id.to_string())
                .object(&user)
                .execute()
                .await;

            match result {
                Ok(_) => {
                    self.advance_user_counter(id + 1).await?;
                    return Ok(user);
                }
                Err(FirestoreError::DataConflictError(_)) => {
                    tracing::debug!(id, "User id already allocated, trying next");
                }
                Err(e) => return Err(AppError::Database(e.to_string())),
            }
        }

        Err(AppError::Database(format!(
            "Could not allocate a user id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }
}

#[async_trait]
impl ExerciseStore for FirestoreDb {
    fn backend(&self) -> &'static str {
        "firestore"
    }

    // ─── User Operations ─────────────────────────────────────────

    async fn create_user(&self, username: &str) -> Result<User, AppError> {
        self.claim_username(username).await?;

        match self.insert_user_at_next_id(username).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username, "User created");
                Ok(user)
            }
            Err(e) => {
                self.release_username(username).await;
                Err(e)
            }
        }
    }

    async fn get_user(&self, id: u64) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("_id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Exercise Operations ─────────────────────────────────────

    async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        let _: Exercise = self
            .client
            .fluent()
            .insert()
            .into(collections::EXERCISES)
            .generate_document_id()
            .object(exercise)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id = exercise.user_id, "Exercise stored");
        Ok(())
    }

    async fn find_exercises(
        &self,
        filter: &ExerciseFilter,
        limit: u32,
    ) -> Result<Vec<Exercise>, AppError> {
        let user_id = filter.user_id;
        // Dates are stored as fixed-width RFC3339 strings, so string bounds work.
        let from = filter.from.map(format_utc_rfc3339);
        let to = filter.to.map(format_utc_rfc3339);

        self.client
            .fluent()
            .select()
            .from(collections::EXERCISES)
            .filter(move |q| {
                q.for_all([
                    q.field("userId").eq(user_id),
                    from.clone()
                        .and_then(|date| q.field("date").greater_than_or_equal(date)),
                    to.clone()
                        .and_then(|date| q.field("date").less_than_or_equal(date)),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn shutdown(&self) -> Result<(), AppError> {
        // The gRPC channel closes when the last client clone drops.
        tracing::info!("Firestore client released");
        Ok(())
    }
}

/// Document id for a username reservation.
fn username_doc_id(username: &str) -> String {
    format!("name:{}", urlencoding::encode(username))
}
