//! Choices and ledger rows.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, fingerprint::Fingerprint, week::WeekStart};

/// One side of a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
  A,
  B,
}

impl Choice {
  /// Case-insensitive; surrounding whitespace is ignored.
  pub fn parse(raw: &str) -> Result<Self, Error> {
    match raw.trim().to_ascii_lowercase().as_str() {
      "a" => Ok(Self::A),
      "b" => Ok(Self::B),
      _ => Err(Error::InvalidChoice(raw.to_owned())),
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::A => "a",
      Self::B => "b",
    }
  }
}

impl fmt::Display for Choice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Choice {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

/// An accepted ballot. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
  pub week_start:        WeekStart,
  pub choice:            Choice,
  pub voter_fingerprint: Fingerprint,
  pub cast_at:           DateTime<Utc>,
}

/// What happened to a single insert attempt against the ledger.
#[derive(Debug, Clone)]
pub enum VoteInsert {
  Recorded(Vote),
  /// The (week, fingerprint) pair already has a row; nothing was written.
  Duplicate,
  /// No matchup with status=active exists for the week; nothing was written.
  NotActive,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn choice_is_case_insensitive() {
    assert_eq!(Choice::parse("A").unwrap(), Choice::A);
    assert_eq!(Choice::parse("a").unwrap(), Choice::A);
    assert_eq!(Choice::parse(" b ").unwrap(), Choice::B);
    assert_eq!(Choice::parse("B").unwrap().as_str(), "b");
  }

  #[test]
  fn choice_rejects_anything_else() {
    for raw in ["", "c", "ab", "1", "option_a"] {
      assert!(matches!(Choice::parse(raw), Err(Error::InvalidChoice(_))), "{raw:?}");
    }
  }

  #[test]
  fn choice_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Choice::A).unwrap(), "\"a\"");
  }
}
