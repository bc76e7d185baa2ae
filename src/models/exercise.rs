// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise model, request parsing, and log query types.

use crate::error::AppError;
use crate::models::lenient_string;
use crate::models::user::parse_user_id;
use crate::time_utils::{format_log_date, parse_client_date, rfc3339_millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Body returned when the log query has no `userId`.
pub const INVALID_USER_ID: &str = "Invalid userId...";

/// Stored exercise record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Owning user
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub description: String,
    /// Duration in minutes
    pub duration: u32,
    /// When the exercise happened (stored as fixed-width RFC3339)
    #[serde(with = "rfc3339_millis")]
    pub date: DateTime<Utc>,
}

/// A validated exercise ready to be recorded.
#[derive(Debug, Clone, Validate)]
pub struct NewExercise {
    pub user_id: u64,
    #[validate(length(min = 1, message = "Path `description` is required."))]
    pub description: String,
    pub duration: u32,
    /// Defaults to now when absent
    pub date: Option<DateTime<Utc>>,
}

/// Raw exercise form as posted by clients (urlencoded or JSON).
#[derive(Debug, Default, Deserialize)]
pub struct AddExerciseInput {
    #[serde(rename = "userId", default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
}

impl AddExerciseInput {
    /// Validate field formats. The user id is checked first so a malformed
    /// id never reaches the store.
    pub fn parse(self) -> Result<NewExercise, AppError> {
        let user_id = parse_user_id(self.user_id.as_deref().unwrap_or_default())?;

        let duration = match non_empty(self.duration) {
            Some(raw) => parse_number(&raw, "duration")?,
            None => {
                return Err(AppError::BadRequest(
                    "Path `duration` is required.".to_string(),
                ))
            }
        };

        let date = non_empty(self.date)
            .map(|raw| parse_date(&raw, "date"))
            .transpose()?;

        Ok(NewExercise {
            user_id,
            description: self.description.unwrap_or_default(),
            duration,
            date,
        })
    }
}

/// Raw log query string.
#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl LogParams {
    pub fn parse(self) -> Result<LogQuery, AppError> {
        let raw_id = non_empty(self.user_id)
            .ok_or_else(|| AppError::BadRequest(INVALID_USER_ID.to_string()))?;
        let user_id = parse_user_id(&raw_id)?;

        let from = non_empty(self.from)
            .map(|raw| parse_date(&raw, "from"))
            .transpose()?;
        let to = non_empty(self.to)
            .map(|raw| parse_date(&raw, "to"))
            .transpose()?;
        let limit = non_empty(self.limit)
            .map(|raw| parse_number(&raw, "limit"))
            .transpose()?;

        Ok(LogQuery {
            user_id,
            from,
            to,
            limit,
        })
    }
}

/// Parsed log query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogQuery {
    pub user_id: u64,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl LogQuery {
    /// Store filter. An upper bound is only honoured after a lower bound.
    pub fn filter(&self) -> ExerciseFilter {
        ExerciseFilter {
            user_id: self.user_id,
            from: self.from,
            to: self.from.and(self.to),
        }
    }

    /// Rows to return. The caller's limit only applies when both bounds
    /// made it into the filter; every other combination yields 0 (no rows).
    pub fn effective_limit(&self) -> u32 {
        let filter = self.filter();
        match (filter.from, filter.to, self.limit) {
            (Some(_), Some(_), Some(limit)) => limit,
            _ => 0,
        }
    }
}

/// Exercise filter passed to the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseFilter {
    pub user_id: u64,
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub to: Option<DateTime<Utc>>,
}

impl ExerciseFilter {
    pub fn matches(&self, exercise: &Exercise) -> bool {
        exercise.user_id == self.user_id
            && self.from.is_none_or(|from| exercise.date >= from)
            && self.to.is_none_or(|to| exercise.date <= to)
    }
}

/// Response for a recorded exercise.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseReceipt {
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub username: String,
    pub description: String,
    pub duration: u32,
    pub date: String,
}

/// One entry of a user's log (owner and document id stripped).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogEntry {
    pub description: String,
    pub duration: u32,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: format_log_date(exercise.date),
        }
    }
}

/// Response for a log query.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseLog {
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_number(raw: &str, path: &str) -> Result<u32, AppError> {
    raw.trim().parse::<u32>().map_err(|_| {
        AppError::BadRequest(format!(
            "Cast to Number failed for value \"{}\" at path \"{}\"",
            raw, path
        ))
    })
}

fn parse_date(raw: &str, path: &str) -> Result<DateTime<Utc>, AppError> {
    parse_client_date(raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Cast to date failed for value \"{}\" at path \"{}\"",
            raw, path
        ))
    })
}
