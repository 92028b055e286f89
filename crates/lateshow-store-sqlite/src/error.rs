//! Error type for `lateshow-store-sqlite`.

use lateshow_core::{ValidationError, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A stored row failed a domain invariant when decoded (e.g. a rating
  /// outside `1..=5`).
  #[error("core error: {0}")]
  Core(#[from] lateshow_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// An appearance referenced an episode that does not exist.
  #[error("episode not found: {0}")]
  EpisodeNotFound(i64),

  /// An appearance referenced a guest that does not exist.
  #[error("guest not found: {0}")]
  GuestNotFound(i64),
}

impl StoreError for Error {
  fn missing_reference(&self) -> Option<ValidationError> {
    match self {
      Error::EpisodeNotFound(_) => Some(ValidationError::episode_not_found()),
      Error::GuestNotFound(_) => Some(ValidationError::guest_not_found()),
      Error::Core(_) | Error::Database(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
