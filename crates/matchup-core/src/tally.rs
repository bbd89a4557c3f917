//! Vote totals and closed-week winners.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, store::MatchupStore, week::WeekStart};

/// Vote counts for one week. Absent rows count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
  pub a: u64,
  pub b: u64,
}

impl Totals {
  pub fn total(&self) -> u64 { self.a + self.b }

  pub fn winner(&self) -> Winner {
    match self.a.cmp(&self.b) {
      std::cmp::Ordering::Greater => Winner::A,
      std::cmp::Ordering::Less => Winner::B,
      std::cmp::Ordering::Equal => Winner::Tie,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
  A,
  B,
  Tie,
}

impl Winner {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::A => "a",
      Self::B => "b",
      Self::Tie => "tie",
    }
  }
}

impl fmt::Display for Winner {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// The outcome of the most recently closed week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedResult {
  pub week_start: WeekStart,
  pub totals:     Totals,
  pub winner:     Winner,
}

pub async fn totals<S: MatchupStore>(store: &S, week: WeekStart) -> Result<Totals> {
  store.tally(week).await.map_err(Error::store)
}

/// Totals and winner for the closed matchup with the latest `week_start`.
/// `None` when no week has been closed yet.
pub async fn last_closed_result<S: MatchupStore>(store: &S) -> Result<Option<ClosedResult>> {
  let Some(matchup) = store.last_closed_matchup().await.map_err(Error::store)? else {
    return Ok(None);
  };
  let totals = totals(store, matchup.week_start).await?;
  Ok(Some(ClosedResult {
    week_start: matchup.week_start,
    totals,
    winner: totals.winner(),
  }))
}
