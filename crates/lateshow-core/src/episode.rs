//! Episode — one broadcast of the show.

use serde::Deserialize;

/// A persisted episode. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
  pub id:     i64,
  /// Free-form air date exactly as recorded (e.g. `"1/11/99"`). Not parsed.
  pub date:   String,
  pub number: i64,
}

/// Input for creating an episode; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewEpisode {
  pub date:   String,
  pub number: i64,
}

impl NewEpisode {
  pub fn new(date: impl Into<String>, number: i64) -> Self {
    Self { date: date.into(), number }
  }
}
