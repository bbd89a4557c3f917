//! The vote ledger: at most one vote per fingerprint per week.
//!
//! Uniqueness is enforced by the store's constraint on
//! `(week_start, voter_fingerprint)`; the insert attempt itself is the
//! concurrency control. A duplicate is reported as `already_voted`, never as
//! an error, so a voter who resubmits sees their vote was taken.

use serde::Serialize;

use crate::{
  Error, Result,
  ballot::{Choice, VoteInsert},
  fingerprint::Fingerprint,
  store::MatchupStore,
  week::WeekStart,
};

/// A vote request that passed validation. Building one never touches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot {
  pub week_start: WeekStart,
  pub choice:     Choice,
}

impl Ballot {
  pub fn parse(week_start: &str, choice: &str) -> Result<Self> {
    Ok(Self {
      week_start: WeekStart::parse(week_start)?,
      choice:     Choice::parse(choice)?,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CastOutcome {
  pub week_start:    WeekStart,
  pub choice:        Choice,
  pub already_voted: bool,
}

/// Record `ballot` for `fingerprint`.
///
/// Fails with [`Error::NoActiveMatchup`] when the week has no matchup or its
/// matchup is not active; nothing is written in that case.
pub async fn cast_vote<S: MatchupStore>(
  store: &S,
  ballot: Ballot,
  fingerprint: Fingerprint,
) -> Result<CastOutcome> {
  let voter = fingerprint.short().to_owned();
  let inserted = store
    .insert_vote(ballot.week_start, ballot.choice, fingerprint)
    .await
    .map_err(Error::store)?;

  let already_voted = match inserted {
    VoteInsert::Recorded(_) => {
      tracing::info!(week = %ballot.week_start, choice = %ballot.choice, %voter, "vote recorded");
      false
    }
    VoteInsert::Duplicate => {
      tracing::debug!(week = %ballot.week_start, %voter, "duplicate vote ignored");
      true
    }
    VoteInsert::NotActive => return Err(Error::NoActiveMatchup(ballot.week_start)),
  };

  Ok(CastOutcome {
    week_start: ballot.week_start,
    choice: ballot.choice,
    already_voted,
  })
}
