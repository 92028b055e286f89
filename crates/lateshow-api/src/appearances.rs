//! Handler for `POST /appearances`.
//!
//! The body is read as raw JSON and checked in the order laid out in
//! [`lateshow_core::validate`]: required fields, then referenced rows, then
//! the rating. Nothing is written unless every check passes.

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use lateshow_core::{
  ValidationError,
  appearance::NewAppearance,
  store::ShowStore,
  validate,
  view::AppearanceCreated,
};
use serde_json::Value;

use crate::error::ApiError;

/// `POST /appearances` — body: `{"rating": 5, "episode_id": 1, "guest_id": 1}`.
///
/// Returns 201 + [`AppearanceCreated`], or 422 with the validation messages.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShowStore,
{
  // An unparseable body has no fields at all.
  let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
  let fields = validate::required_fields(&body)?;

  let episode = match validate::reference_id(fields.episode_id) {
    Some(id) => store.get_episode(id).await.map_err(ApiError::store)?,
    None => None,
  }
  .ok_or_else(ValidationError::episode_not_found)?;

  let guest = match validate::reference_id(fields.guest_id) {
    Some(id) => store.get_guest(id).await.map_err(ApiError::store)?,
    None => None,
  }
  .ok_or_else(ValidationError::guest_not_found)?;

  let rating = validate::rating(fields.rating)?;

  let appearance = store
    .add_appearance(NewAppearance {
      rating,
      episode_id: episode.id,
      guest_id: guest.id,
    })
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(
    id = appearance.id,
    episode_id = episode.id,
    guest_id = guest.id,
    "created appearance"
  );

  Ok((
    StatusCode::CREATED,
    Json(AppearanceCreated::new(&appearance, &episode, &guest)),
  ))
}
