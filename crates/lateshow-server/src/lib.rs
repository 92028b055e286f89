//! HTTP server wiring for the Late Show API.
//!
//! Holds the runtime configuration and builds the top-level axum [`Router`]
//! around [`lateshow_api::api_router`]. The binary in `main.rs` owns the store
//! lifecycle.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use lateshow_core::store::ShowStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `LATESHOW_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  /// SQLite file. When unset, `DATABASE_URL` is consulted before falling
  /// back to `app.db`.
  #[serde(default)]
  pub database_path: Option<PathBuf>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5555 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self { host: default_host(), port: default_port(), database_path: None }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Pick the database file: explicit setting, then `database_url`
  /// (`sqlite:///path` form), then `app.db`. A leading `~/` is expanded.
  pub fn resolve_database_path(&self, database_url: Option<&str>) -> PathBuf {
    let path = self
      .database_path
      .clone()
      .or_else(|| database_url.and_then(sqlite_url_path))
      .unwrap_or_else(|| PathBuf::from("app.db"));
    expand_tilde(&path)
  }
}

/// Extract the file path from a `sqlite:///relative.db` or
/// `sqlite:////abs/path.db` URL.
fn sqlite_url_path(url: &str) -> Option<PathBuf> {
  url
    .strip_prefix("sqlite:///")
    .filter(|p| !p.is_empty())
    .map(PathBuf::from)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server's axum [`Router`] for `store`, with request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: ShowStore + 'static,
{
  lateshow_api::api_router(store).layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
