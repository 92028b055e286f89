//! [`SqliteStore`] — the SQLite implementation of [`ShowStore`].

use std::path::Path;

use lateshow_core::{
  appearance::{Appearance, NewAppearance},
  episode::{Episode, NewEpisode},
  guest::{Guest, NewGuest},
  store::ShowStore,
};
use rusqlite::{Connection, OptionalExtension as _, params};
use tracing::{debug, info};

use crate::{
  Error, Result,
  encode::{
    APPEARANCE_COLUMNS, EPISODE_COLUMNS, GUEST_COLUMNS, RawAppearance,
    episode_from_row, guest_from_row,
  },
  schema::{DROP, PRAGMAS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Late Show store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The store is
/// opened explicitly with [`open`](Self::open) and should be shut down with
/// [`close`](Self::close) once the last user is done with it.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "opened store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Other clones of this store fail all
  /// further calls afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    info!("closed store");
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── Blocking helpers ────────────────────────────────────────────────────────
//
// These run inside `Connection::call`, usually against an open transaction.

/// A reference that did not resolve when an appearance was about to be
/// inserted.
enum Missing {
  Episode(i64),
  Guest(i64),
}

impl From<Missing> for Error {
  fn from(m: Missing) -> Self {
    match m {
      Missing::Episode(id) => Error::EpisodeNotFound(id),
      Missing::Guest(id) => Error::GuestNotFound(id),
    }
  }
}

fn row_exists(conn: &Connection, sql: &str, id: i64) -> rusqlite::Result<bool> {
  Ok(conn.query_row(sql, params![id], |_| Ok(())).optional()?.is_some())
}

fn missing_reference(
  conn:       &Connection,
  episode_id: i64,
  guest_id:   i64,
) -> rusqlite::Result<Option<Missing>> {
  if !row_exists(conn, "SELECT 1 FROM episodes WHERE id = ?1", episode_id)? {
    return Ok(Some(Missing::Episode(episode_id)));
  }
  if !row_exists(conn, "SELECT 1 FROM guests WHERE id = ?1", guest_id)? {
    return Ok(Some(Missing::Guest(guest_id)));
  }
  Ok(None)
}

fn insert_episode(conn: &Connection, input: NewEpisode) -> rusqlite::Result<Episode> {
  conn.execute(
    "INSERT INTO episodes (date, number) VALUES (?1, ?2)",
    params![input.date, input.number],
  )?;
  Ok(Episode {
    id:     conn.last_insert_rowid(),
    date:   input.date,
    number: input.number,
  })
}

fn insert_guest(conn: &Connection, input: NewGuest) -> rusqlite::Result<Guest> {
  conn.execute(
    "INSERT INTO guests (name, occupation) VALUES (?1, ?2)",
    params![input.name, input.occupation],
  )?;
  Ok(Guest {
    id:         conn.last_insert_rowid(),
    name:       input.name,
    occupation: input.occupation,
  })
}

/// Insert an appearance whose references have already been checked.
fn insert_appearance(conn: &Connection, input: NewAppearance) -> rusqlite::Result<Appearance> {
  conn.execute(
    "INSERT INTO appearances (rating, episode_id, guest_id) VALUES (?1, ?2, ?3)",
    params![input.rating.get(), input.episode_id, input.guest_id],
  )?;
  Ok(Appearance {
    id:         conn.last_insert_rowid(),
    rating:     input.rating,
    episode_id: input.episode_id,
    guest_id:   input.guest_id,
  })
}

/// Delete `id` from `table` after removing the appearances that reference it
/// through `fk_column`. Returns the number of appearances removed, or `None`
/// if the parent row did not exist.
fn delete_with_appearances(
  conn:      &mut Connection,
  table:     &'static str,
  fk_column: &'static str,
  id:        i64,
) -> rusqlite::Result<Option<usize>> {
  let tx = conn.transaction()?;
  let dependants = tx.execute(
    &format!("DELETE FROM appearances WHERE {fk_column} = ?1"),
    params![id],
  )?;
  let deleted = tx.execute(&format!("DELETE FROM {table} WHERE id = ?1"), params![id])?;
  if deleted == 0 {
    // Dropping the transaction rolls it back.
    return Ok(None);
  }
  tx.commit()?;
  Ok(Some(dependants))
}

// ─── ShowStore impl ──────────────────────────────────────────────────────────

impl ShowStore for SqliteStore {
  type Error = Error;

  // ── Episodes ──────────────────────────────────────────────────────────────

  async fn list_episodes(&self) -> Result<Vec<Episode>> {
    let episodes = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {EPISODE_COLUMNS} FROM episodes ORDER BY id"))?;
        let rows = stmt
          .query_map([], |row| episode_from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    debug!(count = episodes.len(), "listed episodes");
    Ok(episodes)
  }

  async fn get_episode(&self, id: i64) -> Result<Option<Episode>> {
    let episode = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {EPISODE_COLUMNS} FROM episodes WHERE id = ?1"),
            params![id],
            |row| episode_from_row(row, 0),
          )
          .optional()?)
      })
      .await?;
    Ok(episode)
  }

  async fn add_episode(&self, input: NewEpisode) -> Result<Episode> {
    let episode = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let episode = insert_episode(&tx, input)?;
        tx.commit()?;
        Ok(episode)
      })
      .await?;
    debug!(id = episode.id, "added episode");
    Ok(episode)
  }

  async fn delete_episode(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| Ok(delete_with_appearances(conn, "episodes", "episode_id", id)?))
      .await?;
    match removed {
      Some(appearances) => {
        debug!(id, appearances, "deleted episode");
        Ok(true)
      }
      None => Ok(false),
    }
  }

  // ── Guests ────────────────────────────────────────────────────────────────

  async fn list_guests(&self) -> Result<Vec<Guest>> {
    let guests = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {GUEST_COLUMNS} FROM guests ORDER BY id"))?;
        let rows = stmt
          .query_map([], |row| guest_from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    debug!(count = guests.len(), "listed guests");
    Ok(guests)
  }

  async fn get_guest(&self, id: i64) -> Result<Option<Guest>> {
    let guest = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE id = ?1"),
            params![id],
            |row| guest_from_row(row, 0),
          )
          .optional()?)
      })
      .await?;
    Ok(guest)
  }

  async fn add_guest(&self, input: NewGuest) -> Result<Guest> {
    let guest = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let guest = insert_guest(&tx, input)?;
        tx.commit()?;
        Ok(guest)
      })
      .await?;
    debug!(id = guest.id, "added guest");
    Ok(guest)
  }

  async fn delete_guest(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| Ok(delete_with_appearances(conn, "guests", "guest_id", id)?))
      .await?;
    match removed {
      Some(appearances) => {
        debug!(id, appearances, "deleted guest");
        Ok(true)
      }
      None => Ok(false),
    }
  }

  // ── Appearances ───────────────────────────────────────────────────────────

  async fn get_appearance(&self, id: i64) -> Result<Option<Appearance>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {APPEARANCE_COLUMNS} FROM appearances WHERE id = ?1"),
            params![id],
            |row| RawAppearance::from_row(row, 0),
          )
          .optional()?)
      })
      .await?;
    raw.map(RawAppearance::into_appearance).transpose()
  }

  async fn add_appearance(&self, input: NewAppearance) -> Result<Appearance> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let Some(missing) = missing_reference(&tx, input.episode_id, input.guest_id)? {
          return Ok(Err(missing));
        }
        let appearance = insert_appearance(&tx, input)?;
        tx.commit()?;
        Ok(Ok(appearance))
      })
      .await?;
    let appearance = outcome?;
    debug!(
      id = appearance.id,
      episode_id = appearance.episode_id,
      guest_id = appearance.guest_id,
      "added appearance"
    );
    Ok(appearance)
  }

  async fn count_appearances(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM appearances", [], |r| r.get(0))?))
      .await?;
    Ok(count as u64)
  }

  // ── Relationships ─────────────────────────────────────────────────────────

  async fn appearances_for_episode(&self, episode_id: i64) -> Result<Vec<(Appearance, Guest)>> {
    let rows: Vec<(RawAppearance, Guest)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT a.id, a.rating, a.episode_id, a.guest_id,
                  g.id, g.name, g.occupation
           FROM appearances a
           JOIN guests g ON g.id = a.guest_id
           WHERE a.episode_id = ?1
           ORDER BY a.id",
        )?;
        let rows = stmt
          .query_map(params![episode_id], |row| {
            Ok((RawAppearance::from_row(row, 0)?, guest_from_row(row, 4)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(raw, guest)| Ok((raw.into_appearance()?, guest)))
      .collect()
  }

  async fn guests_of_episode(&self, episode_id: i64) -> Result<Vec<Guest>> {
    let guests = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT g.id, g.name, g.occupation
           FROM appearances a
           JOIN guests g ON g.id = a.guest_id
           WHERE a.episode_id = ?1
           ORDER BY a.id",
        )?;
        let rows = stmt
          .query_map(params![episode_id], |row| guest_from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(guests)
  }

  async fn episodes_of_guest(&self, guest_id: i64) -> Result<Vec<Episode>> {
    let episodes = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.id, e.date, e.number
           FROM appearances a
           JOIN episodes e ON e.id = a.episode_id
           WHERE a.guest_id = ?1
           ORDER BY a.id",
        )?;
        let rows = stmt
          .query_map(params![guest_id], |row| episode_from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(episodes)
  }

  // ── Bulk writes ───────────────────────────────────────────────────────────

  async fn reset(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        // DDL is transactional in SQLite; a failure leaves the old tables.
        let tx = conn.transaction()?;
        tx.execute_batch(DROP)?;
        tx.execute_batch(SCHEMA)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    info!("reset store");
    Ok(())
  }

  async fn insert_episodes(&self, inputs: Vec<NewEpisode>) -> Result<Vec<Episode>> {
    let episodes = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let episodes = inputs
          .into_iter()
          .map(|input| insert_episode(&tx, input))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(episodes)
      })
      .await?;
    debug!(count = episodes.len(), "inserted episodes");
    Ok(episodes)
  }

  async fn insert_guests(&self, inputs: Vec<NewGuest>) -> Result<Vec<Guest>> {
    let guests = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let guests = inputs
          .into_iter()
          .map(|input| insert_guest(&tx, input))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(guests)
      })
      .await?;
    debug!(count = guests.len(), "inserted guests");
    Ok(guests)
  }

  async fn insert_appearances(&self, inputs: Vec<NewAppearance>) -> Result<Vec<Appearance>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut appearances = Vec::with_capacity(inputs.len());
        for input in inputs {
          if let Some(missing) = missing_reference(&tx, input.episode_id, input.guest_id)? {
            return Ok(Err(missing));
          }
          appearances.push(insert_appearance(&tx, input)?);
        }
        tx.commit()?;
        Ok(Ok(appearances))
      })
      .await?;
    let appearances = outcome?;
    debug!(count = appearances.len(), "inserted appearances");
    Ok(appearances)
  }
}
