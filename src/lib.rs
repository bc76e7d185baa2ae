// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: a small REST API for logging workouts.
//!
//! Users sign up with a unique username, record exercises against their
//! sequential id, and query their log by date range.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ExerciseStore;
use services::{ExerciseService, UserService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ExerciseStore>,
    pub users: UserService,
    pub exercises: ExerciseService,
}

impl AppState {
    /// Wire both services to one store handle.
    pub fn new(config: Config, store: Arc<dyn ExerciseStore>) -> Self {
        Self {
            users: UserService::new(store.clone()),
            exercises: ExerciseService::new(store.clone()),
            config,
            store,
        }
    }
}
