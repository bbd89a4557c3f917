//! Error type for `matchup-store-sqlite`.

use matchup_core::week::WeekStart;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] matchup_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("a matchup already exists for week {0}")]
  WeekTaken(WeekStart),

  #[error("no matchup for week {0}")]
  MatchupNotFound(WeekStart),

  #[error("another matchup is already active")]
  ActiveMatchupExists,

  #[error("matchup {0} is no longer pending")]
  NotPending(WeekStart),

  #[error("matchup {0} changed concurrently")]
  StatusChanged(WeekStart),

  #[error("item {0:?} already exists")]
  ItemTaken(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
