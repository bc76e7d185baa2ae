// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::error::Result;
use crate::models::{NewUser, User};
use crate::routes::form::FormOrJson;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercise/new-user", post(create_user))
        .route("/api/exercise/users", get(list_users))
}

/// Register a user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    FormOrJson(request): FormOrJson<NewUser>,
) -> Result<Json<User>> {
    let user = state.users.create_user(request).await?;
    Ok(Json(user))
}

/// List every user.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.list_users().await?))
}
