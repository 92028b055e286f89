//! Response shapes.
//!
//! Episode, guest and appearance form a cycle (episode ↔ appearance ↔ guest),
//! so there is no generic recursive serializer. Each view is its own type and
//! nests at most one level below its root: a nested guest or episode is always
//! the flat projection, without relationships of its own.

use serde::Serialize;

use crate::{
  appearance::{Appearance, Rating},
  episode::Episode,
  guest::Guest,
};

// ─── Flat projections ────────────────────────────────────────────────────────

/// `{id, date, number}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeFlat {
  pub id:     i64,
  pub date:   String,
  pub number: i64,
}

impl From<&Episode> for EpisodeFlat {
  fn from(e: &Episode) -> Self {
    Self { id: e.id, date: e.date.clone(), number: e.number }
  }
}

/// `{id, name, occupation}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestFlat {
  pub id:         i64,
  pub name:       String,
  pub occupation: String,
}

impl From<&Guest> for GuestFlat {
  fn from(g: &Guest) -> Self {
    Self { id: g.id, name: g.name.clone(), occupation: g.occupation.clone() }
  }
}

/// `{id, rating, episode_id, guest_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppearanceFlat {
  pub id:         i64,
  pub rating:     Rating,
  pub episode_id: i64,
  pub guest_id:   i64,
}

impl From<&Appearance> for AppearanceFlat {
  fn from(a: &Appearance) -> Self {
    Self {
      id:         a.id,
      rating:     a.rating,
      episode_id: a.episode_id,
      guest_id:   a.guest_id,
    }
  }
}

// ─── Episode detail ──────────────────────────────────────────────────────────

/// An appearance inside an episode detail, with its guest inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppearanceWithGuest {
  pub id:         i64,
  pub rating:     Rating,
  pub episode_id: i64,
  pub guest_id:   i64,
  pub guest:      GuestFlat,
}

impl AppearanceWithGuest {
  pub fn new(appearance: &Appearance, guest: &Guest) -> Self {
    Self {
      id:         appearance.id,
      rating:     appearance.rating,
      episode_id: appearance.episode_id,
      guest_id:   appearance.guest_id,
      guest:      GuestFlat::from(guest),
    }
  }
}

/// `GET /episodes/{id}`: the episode's own fields plus its appearances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeDetail {
  pub id:          i64,
  pub date:        String,
  pub number:      i64,
  pub appearances: Vec<AppearanceWithGuest>,
}

impl EpisodeDetail {
  pub fn new(episode: &Episode, appearances: &[(Appearance, Guest)]) -> Self {
    Self {
      id:          episode.id,
      date:        episode.date.clone(),
      number:      episode.number,
      appearances: appearances
        .iter()
        .map(|(a, g)| AppearanceWithGuest::new(a, g))
        .collect(),
    }
  }
}

// ─── Appearance created ──────────────────────────────────────────────────────

/// `POST /appearances` response: the new appearance with both ends inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppearanceCreated {
  pub id:         i64,
  pub rating:     Rating,
  pub episode_id: i64,
  pub guest_id:   i64,
  pub episode:    EpisodeFlat,
  pub guest:      GuestFlat,
}

impl AppearanceCreated {
  pub fn new(appearance: &Appearance, episode: &Episode, guest: &Guest) -> Self {
    Self {
      id:         appearance.id,
      rating:     appearance.rating,
      episode_id: appearance.episode_id,
      guest_id:   appearance.guest_id,
      episode:    EpisodeFlat::from(episode),
      guest:      GuestFlat::from(guest),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::*;

  fn episode() -> Episode {
    Episode { id: 1, date: "1/11/99".into(), number: 1 }
  }

  fn guest() -> Guest {
    Guest { id: 9, name: "Tom Hanks".into(), occupation: "actor".into() }
  }

  fn appearance(id: i64, rating: i64) -> Appearance {
    Appearance {
      id,
      rating: Rating::new(rating).unwrap(),
      episode_id: 1,
      guest_id: 9,
    }
  }

  fn keys(v: &Value) -> Vec<&str> {
    let mut k: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    k.sort_unstable();
    k
  }

  #[test]
  fn flat_views() {
    assert_eq!(
      serde_json::to_value(EpisodeFlat::from(&episode())).unwrap(),
      json!({ "id": 1, "date": "1/11/99", "number": 1 })
    );
    assert_eq!(
      serde_json::to_value(GuestFlat::from(&guest())).unwrap(),
      json!({ "id": 9, "name": "Tom Hanks", "occupation": "actor" })
    );
    assert_eq!(
      serde_json::to_value(AppearanceFlat::from(&appearance(3, 4))).unwrap(),
      json!({ "id": 3, "rating": 4, "episode_id": 1, "guest_id": 9 })
    );
  }

  #[test]
  fn episode_detail_nests_one_guest_level() {
    let detail = EpisodeDetail::new(&episode(), &[(appearance(3, 5), guest())]);
    let v = serde_json::to_value(&detail).unwrap();

    assert_eq!(
      v,
      json!({
        "id": 1,
        "date": "1/11/99",
        "number": 1,
        "appearances": [{
          "id": 3,
          "rating": 5,
          "episode_id": 1,
          "guest_id": 9,
          "guest": { "id": 9, "name": "Tom Hanks", "occupation": "actor" }
        }]
      })
    );

    // The nested guest carries no relationships back to the episode.
    let nested = &v["appearances"][0]["guest"];
    assert_eq!(keys(nested), ["id", "name", "occupation"]);
  }

  #[test]
  fn episode_detail_preserves_appearance_order() {
    let rows = vec![(appearance(7, 1), guest()), (appearance(2, 2), guest())];
    let detail = EpisodeDetail::new(&episode(), &rows);
    let ids: Vec<i64> = detail.appearances.iter().map(|a| a.id).collect();
    assert_eq!(ids, [7, 2]);
  }

  #[test]
  fn episode_detail_without_appearances() {
    let v = serde_json::to_value(EpisodeDetail::new(&episode(), &[])).unwrap();
    assert_eq!(v["appearances"], json!([]));
  }

  #[test]
  fn appearance_created_inlines_both_ends_shallowly() {
    let created = AppearanceCreated::new(&appearance(11, 5), &episode(), &guest());
    let v = serde_json::to_value(&created).unwrap();

    assert_eq!(
      keys(&v),
      ["episode", "episode_id", "guest", "guest_id", "id", "rating"]
    );
    assert_eq!(keys(&v["episode"]), ["date", "id", "number"]);
    assert_eq!(keys(&v["guest"]), ["id", "name", "occupation"]);
    assert_eq!(v["rating"], json!(5));
  }
}
