//! Matchups and their lifecycle.
//!
//! One matchup exists per voting week. Its status only ever moves forward:
//!
//! ```text
//! pending ──► active ──► closed
//! ```
//!
//! Closed weeks are never reopened and never deleted, so their results stay
//! reproducible.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, week::WeekStart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchupStatus {
  Pending,
  Active,
  Closed,
}

impl MatchupStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Active => "active",
      Self::Closed => "closed",
    }
  }

  pub fn can_transition_to(self, next: Self) -> bool {
    matches!((self, next), (Self::Pending, Self::Active) | (Self::Active, Self::Closed))
  }
}

impl fmt::Display for MatchupStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The pairing of two items for one voting week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
  pub matchup_id:   Uuid,
  pub week_start:   WeekStart,
  pub option_a_ref: Option<String>,
  pub option_b_ref: Option<String>,
  pub status:       MatchupStatus,
  pub created_at:   DateTime<Utc>,
}

impl Matchup {
  /// Both option refs, if both are populated.
  pub fn option_refs(&self) -> Option<(&str, &str)> {
    let a = self.option_a_ref.as_deref().filter(|r| !r.is_empty())?;
    let b = self.option_b_ref.as_deref().filter(|r| !r.is_empty())?;
    Some((a, b))
  }

  /// Validate a status change against the lifecycle.
  pub fn check_transition(&self, next: MatchupStatus) -> Result<()> {
    if !self.status.can_transition_to(next) {
      return Err(Error::InvalidTransition {
        week: self.week_start,
        from: self.status,
        to:   next,
      });
    }
    if next == MatchupStatus::Active && self.option_refs().is_none() {
      return Err(Error::IncompleteMatchup(self.week_start));
    }
    Ok(())
  }
}

/// Input for [`MatchupStore::create_matchup`](crate::store::MatchupStore::create_matchup).
#[derive(Debug, Clone)]
pub struct NewMatchup {
  pub week_start:   WeekStart,
  pub option_a_ref: Option<String>,
  pub option_b_ref: Option<String>,
  /// Create directly in `active` rather than `pending`.
  pub activate:     bool,
}

impl NewMatchup {
  /// The status the matchup is created in, after checking it may start there.
  pub fn initial_status(&self) -> Result<MatchupStatus> {
    if !self.activate {
      return Ok(MatchupStatus::Pending);
    }
    let populated = |r: &Option<String>| r.as_deref().is_some_and(|r| !r.is_empty());
    if populated(&self.option_a_ref) && populated(&self.option_b_ref) {
      Ok(MatchupStatus::Active)
    } else {
      Err(Error::IncompleteMatchup(self.week_start))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn matchup(status: MatchupStatus, a: Option<&str>, b: Option<&str>) -> Matchup {
    Matchup {
      matchup_id: Uuid::nil(),
      week_start: WeekStart::parse("2025-01-06").unwrap(),
      option_a_ref: a.map(Into::into),
      option_b_ref: b.map(Into::into),
      status,
      created_at: Utc::now(),
    }
  }

  #[test]
  fn lifecycle_only_moves_forward() {
    use MatchupStatus::*;
    assert!(Pending.can_transition_to(Active));
    assert!(Active.can_transition_to(Closed));
    assert!(!Pending.can_transition_to(Closed));
    assert!(!Closed.can_transition_to(Active));
    assert!(!Closed.can_transition_to(Pending));
    assert!(!Active.can_transition_to(Pending));
    assert!(!Active.can_transition_to(Active));
  }

  #[test]
  fn activation_requires_both_options() {
    let m = matchup(MatchupStatus::Pending, Some("p1"), None);
    assert!(matches!(
      m.check_transition(MatchupStatus::Active),
      Err(Error::IncompleteMatchup(_))
    ));

    let m = matchup(MatchupStatus::Pending, Some("p1"), Some(""));
    assert!(m.option_refs().is_none());

    let m = matchup(MatchupStatus::Pending, Some("p1"), Some("p2"));
    assert!(m.check_transition(MatchupStatus::Active).is_ok());
    assert_eq!(m.option_refs(), Some(("p1", "p2")));
  }

  #[test]
  fn closed_is_terminal() {
    let m = matchup(MatchupStatus::Closed, Some("p1"), Some("p2"));
    assert!(matches!(
      m.check_transition(MatchupStatus::Active),
      Err(Error::InvalidTransition { .. })
    ));
  }

  #[test]
  fn initial_status() {
    let week = WeekStart::parse("2025-01-06").unwrap();
    let mut input = NewMatchup {
      week_start:   week,
      option_a_ref: Some("p1".into()),
      option_b_ref: None,
      activate:     false,
    };
    assert_eq!(input.initial_status().unwrap(), MatchupStatus::Pending);

    input.activate = true;
    assert!(matches!(input.initial_status(), Err(Error::IncompleteMatchup(_))));

    input.option_b_ref = Some("p2".into());
    assert_eq!(input.initial_status().unwrap(), MatchupStatus::Active);
  }
}
