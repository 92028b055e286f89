//! Handler for `GET /guests`.

use std::sync::Arc;

use axum::{Json, extract::State};
use lateshow_core::{store::ShowStore, view::GuestFlat};

use crate::error::ApiError;

/// `GET /guests`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<GuestFlat>>, ApiError>
where
  S: ShowStore,
{
  let guests = store.list_guests().await.map_err(ApiError::store)?;
  Ok(Json(guests.iter().map(GuestFlat::from).collect()))
}
