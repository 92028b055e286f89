//! `lateshow-seed` — reset the Late Show database and fill it with sample data.
//!
//! # Usage
//!
//! ```
//! lateshow-seed --database app.db
//! lateshow-seed --episodes shows.csv --guests people.csv --random 25 --seed 7
//! ```

mod data;
mod seed;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use data::SeedData;
use lateshow_store_sqlite::SqliteStore;
use rand::{SeedableRng, rngs::StdRng};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "lateshow-seed", about = "Seed the Late Show database")]
struct Args {
  /// SQLite database file to (re)create.
  #[arg(long, env = "LATESHOW_DATABASE_PATH", default_value = "app.db")]
  database: PathBuf,

  /// CSV file with `date,number` columns. Built-in episodes are used when it
  /// is absent or unreadable.
  #[arg(long, value_name = "FILE", default_value = "episodes.csv")]
  episodes: PathBuf,

  /// CSV file with `name,occupation` columns.
  #[arg(long, value_name = "FILE", default_value = "guests.csv")]
  guests: PathBuf,

  /// Number of extra random appearances to attempt.
  #[arg(long, default_value_t = 10)]
  random: usize,

  /// Seed for the random generator, for reproducible data.
  #[arg(long)]
  seed: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  tracing::info!("Starting database seeding...");

  let data = SeedData::load(&args.episodes, &args.guests);
  let mut rng = args
    .seed
    .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

  let store = SqliteStore::open(&args.database)
    .await
    .with_context(|| format!("opening database {}", args.database.display()))?;

  let result = seed::run(&store, data, args.random, &mut rng).await;
  store.close().await.context("closing database")?;
  let summary = result.context("seeding database")?;

  tracing::info!(
    episodes = summary.episodes,
    guests = summary.guests,
    appearances = summary.appearances,
    "Database seeding completed successfully"
  );
  Ok(())
}
