//! Reset the store and fill it with episodes, guests and appearances.

use std::collections::HashSet;

use anyhow::Result;
use lateshow_core::{
  appearance::NewAppearance,
  episode::Episode,
  guest::Guest,
  store::ShowStore,
};
use rand::Rng;

use crate::data::{FIXED_APPEARANCES, SeedData};

/// Row counts after a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
  pub episodes:    usize,
  pub guests:      usize,
  pub appearances: u64,
}

/// Wipe `store` and insert `data`, the fixed appearances, and up to
/// `random` extra appearances with random ratings.
pub async fn run<S, R>(store: &S, data: SeedData, random: usize, rng: &mut R) -> Result<Summary>
where
  S: ShowStore,
  R: Rng,
{
  store.reset().await?;
  tracing::info!("Database tables created");

  let episodes = store.insert_episodes(data.episodes).await?;
  tracing::info!("Seeded {} episodes", episodes.len());

  let guests = store.insert_guests(data.guests).await?;
  tracing::info!("Seeded {} guests", guests.len());

  let planned = plan_appearances(&episodes, &guests, random, rng)?;
  let appearances = store.insert_appearances(planned).await?;
  tracing::info!("Seeded {} appearances", appearances.len());

  Ok(Summary {
    episodes:    episodes.len(),
    guests:      guests.len(),
    appearances: store.count_appearances().await?,
  })
}

/// The fixed appearances whose indices fall inside the inserted lists, then
/// `random` draws over `(episode, guest)` pairs. A drawn pair that is already
/// planned is skipped, so fewer than `random` may be added.
pub fn plan_appearances<R: Rng>(
  episodes: &[Episode],
  guests:   &[Guest],
  random:   usize,
  rng:      &mut R,
) -> Result<Vec<NewAppearance>> {
  let mut planned = Vec::new();
  let mut pairs = HashSet::new();

  for (ep_idx, guest_idx, rating) in FIXED_APPEARANCES {
    let (Some(episode), Some(guest)) = (episodes.get(ep_idx - 1), guests.get(guest_idx - 1))
    else {
      continue;
    };
    planned.push(NewAppearance::new(rating, episode.id, guest.id)?);
    pairs.insert((episode.id, guest.id));
  }

  if episodes.is_empty() || guests.is_empty() {
    return Ok(planned);
  }

  for _ in 0..random {
    let episode = &episodes[rng.random_range(0..episodes.len())];
    let guest = &guests[rng.random_range(0..guests.len())];
    let rating = rng.random_range(1..=5);

    if pairs.insert((episode.id, guest.id)) {
      planned.push(NewAppearance::new(rating, episode.id, guest.id)?);
    }
  }

  Ok(planned)
}

#[cfg(test)]
mod tests {
  use lateshow_store_sqlite::SqliteStore;
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;
  use crate::data::{default_episodes, default_guests};

  fn episodes(n: i64) -> Vec<Episode> {
    (1..=n)
      .map(|id| Episode { id, date: format!("1/{id}/99"), number: id })
      .collect()
  }

  fn guests(n: i64) -> Vec<Guest> {
    (1..=n)
      .map(|id| Guest { id, name: format!("Guest {id}"), occupation: "actor".into() })
      .collect()
  }

  #[test]
  fn fixed_appearances_only() {
    let mut rng = StdRng::seed_from_u64(7);
    let planned = plan_appearances(&episodes(5), &guests(10), 0, &mut rng).unwrap();
    assert_eq!(planned.len(), 10);
    assert_eq!(planned[0], NewAppearance::new(4, 1, 1).unwrap());
    assert_eq!(planned[9], NewAppearance::new(4, 5, 10).unwrap());
  }

  #[test]
  fn fixed_appearances_skip_out_of_range_indices() {
    let mut rng = StdRng::seed_from_u64(7);
    let planned = plan_appearances(&episodes(2), &guests(3), 0, &mut rng).unwrap();
    // (1,1), (1,2), (2,3) fit; (2,4) and later do not.
    assert_eq!(planned.len(), 3);
  }

  #[test]
  fn random_pairs_are_unique_and_in_range() {
    let mut rng = StdRng::seed_from_u64(42);
    let planned = plan_appearances(&episodes(5), &guests(10), 200, &mut rng).unwrap();

    let pairs: HashSet<_> = planned.iter().map(|a| (a.episode_id, a.guest_id)).collect();
    assert_eq!(pairs.len(), planned.len());
    assert!(planned.len() <= 50);
    assert!(planned.iter().all(|a| (1..=5).contains(&a.rating.get())));
  }

  #[test]
  fn nothing_random_without_guests() {
    let mut rng = StdRng::seed_from_u64(1);
    let planned = plan_appearances(&episodes(5), &[], 10, &mut rng).unwrap();
    assert!(planned.is_empty());
  }

  #[tokio::test]
  async fn run_seeds_an_empty_store() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let summary = run(&store, SeedData::defaults(), 10, &mut rng).await.unwrap();
    assert_eq!(summary.episodes, 5);
    assert_eq!(summary.guests, 10);
    assert!((10..=20).contains(&summary.appearances));

    let tom = store.get_guest(9).await.unwrap().unwrap();
    assert_eq!(tom.name, "Tom Hanks");
    let on_five = store.guests_of_episode(5).await.unwrap();
    assert!(on_five.iter().any(|g| g.name == "Tom Hanks"));
  }

  #[tokio::test]
  async fn run_twice_replaces_previous_data() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    run(&store, SeedData::defaults(), 0, &mut rng).await.unwrap();
    let data = SeedData { episodes: default_episodes(), guests: default_guests() };
    let summary = run(&store, data, 0, &mut rng).await.unwrap();

    assert_eq!(summary.appearances, 10);
    assert_eq!(store.list_episodes().await.unwrap().len(), 5);
    assert_eq!(store.list_episodes().await.unwrap()[0].id, 1);
  }
}
