//! JSON REST API for the Late Show.
//!
//! Exposes an axum [`Router`] backed by any [`lateshow_core::store::ShowStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/` | HTML banner |
//! | `GET`    | `/episodes` | Flat episodes |
//! | `GET`    | `/episodes/{id}` | Episode with appearances and their guests |
//! | `DELETE` | `/episodes/{id}` | 204; cascades to appearances |
//! | `GET`    | `/guests` | Flat guests |
//! | `POST`   | `/appearances` | 201 + appearance with episode and guest |

pub mod appearances;
pub mod episodes;
pub mod error;
pub mod guests;

use std::sync::Arc;

use axum::{
  Router,
  response::Html,
  routing::{get, post},
};
use lateshow_core::store::ShowStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ShowStore + 'static,
{
  Router::new()
    .route("/", get(index))
    // Episodes
    .route("/episodes", get(episodes::list::<S>))
    .route(
      "/episodes/{id}",
      get(episodes::get_one::<S>).delete(episodes::delete_one::<S>),
    )
    // Guests
    .route("/guests", get(guests::list::<S>))
    // Appearances
    .route("/appearances", post(appearances::create::<S>))
    .with_state(store)
}

async fn index() -> Html<&'static str> { Html("<h1>The Late Show API</h1>") }
