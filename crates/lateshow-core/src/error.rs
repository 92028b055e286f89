//! Error types for `lateshow-core`.

use thiserror::Error;

/// Message reported when a creation request lacks a required field.
pub const MISSING_FIELDS: &str = "Missing required fields";
/// Message reported when a referenced episode does not exist.
pub const EPISODE_NOT_FOUND: &str = "Episode not found";
/// Message reported when a referenced guest does not exist.
pub const GUEST_NOT_FOUND: &str = "Guest not found";
/// Message reported when a rating is not an integer in `1..=5`.
pub const RATING_OUT_OF_RANGE: &str = "Rating must be an integer between 1 and 5";

/// Domain errors raised while constructing entities.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("Rating must be an integer between 1 and 5 (got {0})")]
  InvalidRating(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Client-supplied data failed a domain rule before reaching the store.
///
/// Carries every human-readable message that should be returned to the
/// caller. Validation stops at the first failing step, so in practice the
/// list holds a single message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {}", .messages.join("; "))]
pub struct ValidationError {
  pub messages: Vec<String>,
}

impl ValidationError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { messages: vec![message.into()] }
  }

  pub fn missing_fields() -> Self { Self::new(MISSING_FIELDS) }

  pub fn episode_not_found() -> Self { Self::new(EPISODE_NOT_FOUND) }

  pub fn guest_not_found() -> Self { Self::new(GUEST_NOT_FOUND) }

  pub fn rating_out_of_range() -> Self { Self::new(RATING_OUT_OF_RANGE) }
}

impl From<Error> for ValidationError {
  fn from(e: Error) -> Self {
    match e {
      Error::InvalidRating(_) => Self::rating_out_of_range(),
    }
  }
}
