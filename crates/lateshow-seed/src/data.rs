//! Seed data: the built-in defaults and the optional CSV files.
//!
//! `episodes.csv` has the columns `date,number`; `guests.csv` has
//! `name,occupation`. Each file is read on its own, and either one may be
//! absent.

use std::path::Path;

use anyhow::{Context, Result};
use lateshow_core::{episode::NewEpisode, guest::NewGuest};
use serde::de::DeserializeOwned;

/// Episodes and guests to insert.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
  pub episodes: Vec<NewEpisode>,
  pub guests:   Vec<NewGuest>,
}

/// `(episode index, guest index, rating)`, 1-based into the inserted lists.
pub const FIXED_APPEARANCES: [(usize, usize, i64); 10] = [
  (1, 1, 4),
  (1, 2, 5),
  (2, 3, 3),
  (2, 4, 4),
  (3, 5, 5),
  (3, 6, 4),
  (4, 7, 5),
  (4, 8, 3),
  (5, 9, 5),
  (5, 10, 4),
];

pub fn default_episodes() -> Vec<NewEpisode> {
  (1..=5)
    .map(|n| NewEpisode::new(format!("1/{}/99", 10 + n), n))
    .collect()
}

pub fn default_guests() -> Vec<NewGuest> {
  [
    ("Michael J. Fox", "actor"),
    ("Sandra Bernhard", "Comedian"),
    ("Tracey Ullman", "television actress"),
    ("Kevin Bacon", "actor"),
    ("David Bowie", "musician"),
    ("Madonna", "singer"),
    ("Robin Williams", "actor/comedian"),
    ("Julia Roberts", "actress"),
    ("Tom Hanks", "actor"),
    ("Beyoncé", "singer"),
  ]
  .into_iter()
  .map(|(name, occupation)| NewGuest::new(name, occupation))
  .collect()
}

/// Every record of a headed CSV file, matched to `T`'s fields by column name.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
  let mut reader = csv::ReaderBuilder::new()
    .trim(csv::Trim::All)
    .from_path(path)
    .with_context(|| format!("opening {}", path.display()))?;

  reader
    .deserialize()
    .collect::<csv::Result<Vec<T>>>()
    .with_context(|| format!("parsing {}", path.display()))
}

/// `path` if it exists, otherwise `defaults`. A file that exists but cannot be
/// read or parsed also yields `defaults`, with a warning. A file with only a
/// header row is taken as is.
fn load_or_default<T: DeserializeOwned>(
  path:     &Path,
  what:     &str,
  defaults: fn() -> Vec<T>,
) -> Vec<T> {
  if !path.exists() {
    tracing::info!("Using default {what} data");
    return defaults();
  }

  match read_csv(path) {
    Ok(rows) => {
      tracing::info!(path = %path.display(), count = rows.len(), "Loaded {what}");
      rows
    }
    Err(e) => {
      tracing::warn!("Error loading {what}, using defaults: {e:#}");
      defaults()
    }
  }
}

impl SeedData {
  pub fn defaults() -> Self {
    Self { episodes: default_episodes(), guests: default_guests() }
  }

  pub fn load(episodes: &Path, guests: &Path) -> Self {
    Self {
      episodes: load_or_default(episodes, "episodes", default_episodes),
      guests:   load_or_default(guests, "guests", default_guests),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn defaults_match_the_show() {
    let data = SeedData::defaults();
    assert_eq!(data.episodes.len(), 5);
    assert_eq!(data.episodes[0], NewEpisode::new("1/11/99", 1));
    assert_eq!(data.episodes[4], NewEpisode::new("1/15/99", 5));
    assert_eq!(data.guests.len(), 10);
    assert_eq!(data.guests[8], NewGuest::new("Tom Hanks", "actor"));
  }

  #[test]
  fn loads_both_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let episodes = write(&dir, "episodes.csv", "date,number\n2/1/00,42\n2/2/00, 43\n");
    let guests = write(&dir, "guests.csv", "name,occupation\nBill Murray,actor\n\"Cher\",singer\n");

    let data = SeedData::load(&episodes, &guests);
    assert_eq!(
      data.episodes,
      [NewEpisode::new("2/1/00", 42), NewEpisode::new("2/2/00", 43)]
    );
    assert_eq!(
      data.guests,
      [NewGuest::new("Bill Murray", "actor"), NewGuest::new("Cher", "singer")]
    );
  }

  #[test]
  fn columns_are_matched_by_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "episodes.csv", "number,date\n7,3/3/01\n");

    let rows: Vec<NewEpisode> = read_csv(&path).unwrap();
    assert_eq!(rows, [NewEpisode::new("3/3/01", 7)]);
  }

  #[test]
  fn malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let episodes = write(&dir, "episodes.csv", "date,number\n1/11/99,one\n");
    let guests = write(&dir, "guests.csv", "name\nCher\n");

    assert!(read_csv::<NewEpisode>(&episodes).is_err());

    let data = SeedData::load(&episodes, &guests);
    assert_eq!(data.episodes, default_episodes());
    assert_eq!(data.guests, default_guests());
  }

  #[test]
  fn missing_files_use_defaults_independently() {
    let dir = tempfile::tempdir().unwrap();
    let guests = write(&dir, "guests.csv", "name,occupation\nCher,singer\n");

    let data = SeedData::load(&dir.path().join("episodes.csv"), &guests);
    assert_eq!(data.episodes, default_episodes());
    assert_eq!(data.guests, [NewGuest::new("Cher", "singer")]);
  }

  #[test]
  fn header_only_file_seeds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let episodes = write(&dir, "episodes.csv", "date,number\n");

    let data = SeedData::load(&episodes, &dir.path().join("guests.csv"));
    assert!(data.episodes.is_empty());
    assert_eq!(data.guests, default_guests());
  }
}
