// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User signup and listing.

use crate::db::ExerciseStore;
use crate::error::Result;
use crate::models::{NewUser, User};
use std::sync::Arc;
use validator::Validate;

/// Creates and lists users.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn ExerciseStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn ExerciseStore>) -> Self {
        Self { store }
    }

    /// Register a new user with the next sequential id.
    pub async fn create_user(&self, request: NewUser) -> Result<User> {
        request.validate()?;

        let user = self.store.create_user(&request.username).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// All users, unpaginated.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }
}
