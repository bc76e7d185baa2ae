// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise routes.

use crate::error::Result;
use crate::models::{AddExerciseInput, ExerciseLog, ExerciseReceipt, LogParams};
use crate::routes::form::FormOrJson;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercise/add", post(add_exercise))
        .route("/api/exercise/log", get(get_log))
}

/// Record an exercise.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    FormOrJson(input): FormOrJson<AddExerciseInput>,
) -> Result<Json<ExerciseReceipt>> {
    let request = input.parse()?;
    Ok(Json(state.exercises.add_exercise(request).await?))
}

/// Query a user's log.
async fn get_log(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogParams>,
) -> Result<Json<ExerciseLog>> {
    let query = params.parse()?;
    Ok(Json(state.exercises.get_log(query).await?))
}
