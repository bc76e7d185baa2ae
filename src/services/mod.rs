// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod exercise;
pub mod user;

pub use exercise::ExerciseService;
pub use user::UserService;
