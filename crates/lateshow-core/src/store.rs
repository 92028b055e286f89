//! The `ShowStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `lateshow-store-sqlite`).
//! Higher layers (`lateshow-api`, the seeder) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  ValidationError,
  appearance::{Appearance, NewAppearance, Rating},
  episode::{Episode, NewEpisode},
  guest::{Guest, NewGuest},
};

/// Error type of a [`ShowStore`] backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The caller's input named a row that does not exist when the write ran.
  ///
  /// Backends re-check references inside the insert transaction; a row
  /// deleted after the caller looked it up surfaces here, so it can be
  /// reported like any other missing reference.
  fn missing_reference(&self) -> Option<ValidationError> { None }
}

/// Abstraction over a transactional store for episodes, guests and
/// appearances.
///
/// Every write runs inside a single transaction: either all of its rows are
/// committed or none are. Deleting an episode or guest removes its
/// appearances in the same transaction.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ShowStore: Send + Sync {
  type Error: StoreError;

  // ── Episodes ──────────────────────────────────────────────────────────

  /// All episodes, ordered by id.
  fn list_episodes(
    &self,
  ) -> impl Future<Output = Result<Vec<Episode>, Self::Error>> + Send + '_;

  /// Retrieve an episode by id. Returns `None` if not found.
  fn get_episode(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Episode>, Self::Error>> + Send + '_;

  fn add_episode(
    &self,
    input: NewEpisode,
  ) -> impl Future<Output = Result<Episode, Self::Error>> + Send + '_;

  /// Delete an episode and all of its appearances.
  ///
  /// Returns `false` (and changes nothing) if the episode does not exist.
  fn delete_episode(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Guests ────────────────────────────────────────────────────────────

  /// All guests, ordered by id.
  fn list_guests(
    &self,
  ) -> impl Future<Output = Result<Vec<Guest>, Self::Error>> + Send + '_;

  fn get_guest(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Guest>, Self::Error>> + Send + '_;

  fn add_guest(
    &self,
    input: NewGuest,
  ) -> impl Future<Output = Result<Guest, Self::Error>> + Send + '_;

  /// Delete a guest and all of their appearances.
  fn delete_guest(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Appearances ───────────────────────────────────────────────────────

  fn get_appearance(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Appearance>, Self::Error>> + Send + '_;

  /// Persist a new appearance.
  ///
  /// Fails if either the episode or the guest does not exist at the moment
  /// of insertion; nothing is written in that case.
  fn add_appearance(
    &self,
    input: NewAppearance,
  ) -> impl Future<Output = Result<Appearance, Self::Error>> + Send + '_;

  fn count_appearances(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Relationships ─────────────────────────────────────────────────────
  //
  // Derived by joining through `appearances` on every call; nothing here is
  // stored separately.

  /// An episode's appearances, each paired with its guest, in creation order.
  fn appearances_for_episode(
    &self,
    episode_id: i64,
  ) -> impl Future<Output = Result<Vec<(Appearance, Guest)>, Self::Error>> + Send + '_;

  /// Guests reachable from an episode through its appearances, in
  /// appearance-creation order. A guest appearing twice is listed twice.
  fn guests_of_episode(
    &self,
    episode_id: i64,
  ) -> impl Future<Output = Result<Vec<Guest>, Self::Error>> + Send + '_;

  /// Episodes reachable from a guest through their appearances.
  fn episodes_of_guest(
    &self,
    guest_id: i64,
  ) -> impl Future<Output = Result<Vec<Episode>, Self::Error>> + Send + '_;

  /// Attach a guest to an episode, creating the mediating appearance.
  fn attach_guest(
    &self,
    episode_id: i64,
    guest_id: i64,
    rating: Rating,
  ) -> impl Future<Output = Result<Appearance, Self::Error>> + Send + '_ {
    self.add_appearance(NewAppearance { rating, episode_id, guest_id })
  }

  // ── Bulk writes (seeding) ─────────────────────────────────────────────

  /// Drop and recreate every table.
  fn reset(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert many episodes in one transaction.
  fn insert_episodes(
    &self,
    inputs: Vec<NewEpisode>,
  ) -> impl Future<Output = Result<Vec<Episode>, Self::Error>> + Send + '_;

  /// Insert many guests in one transaction.
  fn insert_guests(
    &self,
    inputs: Vec<NewGuest>,
  ) -> impl Future<Output = Result<Vec<Guest>, Self::Error>> + Send + '_;

  /// Insert many appearances in one transaction. Every reference is still
  /// checked; one missing row rolls back the whole batch.
  fn insert_appearances(
    &self,
    inputs: Vec<NewAppearance>,
  ) -> impl Future<Output = Result<Vec<Appearance>, Self::Error>> + Send + '_;
}
