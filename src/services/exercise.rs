// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise recording and log queries.
//!
//! Log queries keep a legacy coupling between the date filter and the row
//! limit: the caller's `limit` only applies when both `from` and `to` are
//! supplied, and every other combination returns no rows.

use crate::db::ExerciseStore;
use crate::error::{AppError, Result};
use crate::models::{Exercise, ExerciseLog, ExerciseReceipt, LogEntry, LogQuery, NewExercise};
use crate::time_utils::format_log_date;
use std::sync::Arc;
use validator::Validate;

const USER_ID_NOT_FOUND: &str = "User ID does not exist";
const USER_NOT_FOUND: &str = "User does not exist...";
const LOG_NOT_FOUND: &str = "Not Found...";

/// Records exercises and answers log queries.
#[derive(Clone)]
pub struct ExerciseService {
    store: Arc<dyn ExerciseStore>,
}

impl ExerciseService {
    pub fn new(store: Arc<dyn ExerciseStore>) -> Self {
        Self { store }
    }

    /// Record an exercise for an existing user.
    pub async fn add_exercise(&self, request: NewExercise) -> Result<ExerciseReceipt> {
        request.validate()?;

        let user = self
            .store
            .get_user(request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_ID_NOT_FOUND.to_string()))?;

        let exercise = Exercise {
            user_id: user.id,
            description: request.description,
            duration: request.duration,
            date: request.date.unwrap_or_else(chrono::Utc::now),
        };

        self.store.insert_exercise(&exercise).await?;

        tracing::info!(
            user_id = user.id,
            duration = exercise.duration,
            date = %exercise.date,
            "Exercise recorded"
        );

        Ok(ExerciseReceipt {
            id: user.id,
            username: user.username,
            description: exercise.description,
            duration: exercise.duration,
            date: format_log_date(exercise.date),
        })
    }

    /// Fetch a user's log.
    pub async fn get_log(&self, query: LogQuery) -> Result<ExerciseLog> {
        let user = self
            .store
            .get_user(query.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        let filter = query.filter();
        let limit = query.effective_limit();

        tracing::debug!(
            user_id = user.id,
            from = ?filter.from,
            to = ?filter.to,
            requested_limit = ?query.limit,
            limit,
            "Fetching exercise log"
        );

        let exercises = if limit == 0 {
            Vec::new()
        } else {
            self.store.find_exercises(&filter, limit).await?
        };

        if exercises.is_empty() {
            return Err(AppError::NotFound(LOG_NOT_FOUND.to_string()));
        }

        let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();

        Ok(ExerciseLog {
            id: user.id,
            username: user.username,
            count: log.len(),
            log,
        })
    }
}
