//! Appearance — the join entity linking a guest to an episode with a rating.
//!
//! An appearance can only be built through constructors that check the
//! rating, so an out-of-range value never exists in memory regardless of
//! which path (HTTP, seeding, a decoded row) produced it.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Rating ──────────────────────────────────────────────────────────────────

/// A guest's rating for an appearance; always in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
  pub const MIN: i64 = 1;
  pub const MAX: i64 = 5;

  /// Fails with [`Error::InvalidRating`] unless `MIN <= value <= MAX`.
  pub fn new(value: i64) -> Result<Self> {
    if (Self::MIN..=Self::MAX).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::InvalidRating(value))
    }
  }

  pub fn get(self) -> i64 { i64::from(self.0) }
}

impl TryFrom<i64> for Rating {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> { Self::new(value) }
}

impl From<Rating> for i64 {
  fn from(r: Rating) -> Self { r.get() }
}

// ─── Appearance ──────────────────────────────────────────────────────────────

/// A persisted appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
  pub id:         i64,
  pub rating:     Rating,
  pub episode_id: i64,
  pub guest_id:   i64,
}

/// Input for creating an appearance.
///
/// Both references must resolve to live rows when the store inserts it; the
/// store re-checks that inside the write transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppearance {
  pub rating:     Rating,
  pub episode_id: i64,
  pub guest_id:   i64,
}

impl NewAppearance {
  /// Build an appearance from an unchecked integer rating.
  pub fn new(rating: i64, episode_id: i64, guest_id: i64) -> Result<Self> {
    Ok(Self { rating: Rating::new(rating)?, episode_id, guest_id })
  }
}
