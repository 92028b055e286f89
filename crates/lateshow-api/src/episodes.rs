//! Handlers for `/episodes` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/episodes` | Flat list |
//! | `GET`    | `/episodes/{id}` | [`EpisodeDetail`]; 404 if not found |
//! | `DELETE` | `/episodes/{id}` | 204; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use lateshow_core::{
  store::ShowStore,
  view::{EpisodeDetail, EpisodeFlat},
};

use crate::error::ApiError;

const NOT_FOUND: &str = "Episode not found";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /episodes`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<EpisodeFlat>>, ApiError>
where
  S: ShowStore,
{
  let episodes = store.list_episodes().await.map_err(ApiError::store)?;
  Ok(Json(episodes.iter().map(EpisodeFlat::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /episodes/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<EpisodeDetail>, ApiError>
where
  S: ShowStore,
{
  let episode = store
    .get_episode(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))?;

  let appearances = store
    .appearances_for_episode(episode.id)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(EpisodeDetail::new(&episode, &appearances)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /episodes/{id}` — also removes the episode's appearances.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: ShowStore,
{
  if store.delete_episode(id).await.map_err(ApiError::store)? {
    tracing::info!(id, "deleted episode");
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(NOT_FOUND.to_owned()))
  }
}
