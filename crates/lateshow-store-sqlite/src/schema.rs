//! SQL schema for the Late Show SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Per-connection settings. Run outside any transaction: SQLite ignores
/// `foreign_keys` and rejects a switch to WAL inside one.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`. Safe to run
/// inside a transaction.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS episodes (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    date    TEXT    NOT NULL,   -- free-form, stored as given
    number  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS guests (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    occupation  TEXT NOT NULL
);

-- Join table for the episode <-> guest many-to-many relationship.
-- The store deletes dependants explicitly; ON DELETE CASCADE is a backstop.
-- No UNIQUE (episode_id, guest_id): a pair may appear more than once.
CREATE TABLE IF NOT EXISTS appearances (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    rating      INTEGER NOT NULL,
    episode_id  INTEGER NOT NULL,
    guest_id    INTEGER NOT NULL,
    CONSTRAINT ck_appearances_rating
      CHECK (rating BETWEEN 1 AND 5),
    CONSTRAINT fk_appearances_episode_id_episodes
      FOREIGN KEY (episode_id) REFERENCES episodes(id) ON DELETE CASCADE,
    CONSTRAINT fk_appearances_guest_id_guests
      FOREIGN KEY (guest_id) REFERENCES guests(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS ix_appearances_episode_id ON appearances(episode_id);
CREATE INDEX IF NOT EXISTS ix_appearances_guest_id   ON appearances(guest_id);

PRAGMA user_version = 1;
";

/// Drops every table; run before [`SCHEMA`], in the same transaction, to
/// reset the store.
pub const DROP: &str = "
DROP TABLE IF EXISTS appearances;
DROP TABLE IF EXISTS guests;
DROP TABLE IF EXISTS episodes;
";
