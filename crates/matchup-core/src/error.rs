//! Error types for `matchup-core`.

use thiserror::Error;

use crate::{matchup::MatchupStatus, week::WeekStart};

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid week_start {0:?}, expected YYYY-MM-DD")]
  InvalidWeekStart(String),

  #[error("invalid choice {0:?}, expected \"a\" or \"b\"")]
  InvalidChoice(String),

  #[error("no active matchup for week {0}")]
  NoActiveMatchup(WeekStart),

  #[error("matchup {week} cannot move from {from} to {to}")]
  InvalidTransition {
    week: WeekStart,
    from: MatchupStatus,
    to:   MatchupStatus,
  },

  #[error("matchup {0} needs both options before it can be activated")]
  IncompleteMatchup(WeekStart),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// `true` for malformed caller input, detected before storage is touched.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::InvalidWeekStart(_) | Self::InvalidChoice(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
