//! User model for storage and API.

use crate::error::AppError;
use crate::models::lenient_text;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Body returned when a user id cannot be parsed.
pub const UNKNOWN_ID: &str = "unknown _id";

/// User account stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Sequential id (also used as document ID)
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub username: String,
}

/// Shortest accepted username, in UTF-16 code units.
const MIN_USERNAME_UNITS: usize = 5;

/// Signup request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(custom(function = "validate_username_length"))]
    pub username: String,
}

/// Length is counted in UTF-16 code units, as browsers count `minlength`,
/// so a character outside the BMP counts twice.
fn validate_username_length(username: &str) -> Result<(), ValidationError> {
    if username.encode_utf16().count() >= MIN_USERNAME_UNITS {
        return Ok(());
    }
    Err(ValidationError::new("length").with_message(Cow::Borrowed(
        "Username needs to be at least 5 characters long...",
    )))
}

/// Parse a caller-supplied user id before any lookup.
pub fn parse_user_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::BadRequest(UNKNOWN_ID.to_string()))
}
