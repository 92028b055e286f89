//! Decoding helpers between SQLite rows and domain types.
//!
//! Rows are first read into plain `Raw*` structs inside the blocking
//! connection closure, then converted to domain types on the async side, where
//! invariant failures can be reported as [`Error`](crate::Error) values.

use lateshow_core::{
  appearance::{Appearance, Rating},
  episode::Episode,
  guest::Guest,
};
use rusqlite::Row;

use crate::Result;

// ─── Column lists ────────────────────────────────────────────────────────────

pub const EPISODE_COLUMNS: &str = "id, date, number";
pub const GUEST_COLUMNS: &str = "id, name, occupation";
pub const APPEARANCE_COLUMNS: &str = "id, rating, episode_id, guest_id";

// ─── Episode ─────────────────────────────────────────────────────────────────

pub fn episode_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Episode> {
  Ok(Episode {
    id:     row.get(offset)?,
    date:   row.get(offset + 1)?,
    number: row.get(offset + 2)?,
  })
}

// ─── Guest ───────────────────────────────────────────────────────────────────

pub fn guest_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Guest> {
  Ok(Guest {
    id:         row.get(offset)?,
    name:       row.get(offset + 1)?,
    occupation: row.get(offset + 2)?,
  })
}

// ─── Appearance ──────────────────────────────────────────────────────────────

/// An appearance row with its rating not yet checked.
pub struct RawAppearance {
  pub id:         i64,
  pub rating:     i64,
  pub episode_id: i64,
  pub guest_id:   i64,
}

impl RawAppearance {
  pub fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(offset)?,
      rating:     row.get(offset + 1)?,
      episode_id: row.get(offset + 2)?,
      guest_id:   row.get(offset + 3)?,
    })
  }

  /// Re-assert the rating invariant on the way out of storage.
  pub fn into_appearance(self) -> Result<Appearance> {
    Ok(Appearance {
      id:         self.id,
      rating:     Rating::new(self.rating)?,
      episode_id: self.episode_id,
      guest_id:   self.guest_id,
    })
  }
}
