//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with a fixed microsecond width so that
//! they sort lexically. Weeks are `YYYY-MM-DD`. UUIDs are hyphenated
//! lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use matchup_core::{
  item::Item,
  matchup::{Matchup, MatchupStatus},
  week::WeekStart,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

pub fn encode_week(week: WeekStart) -> String { week.to_string() }

pub fn decode_week(s: &str) -> Result<WeekStart> {
  WeekStart::parse(s).map_err(|e| Error::Decode(e.to_string()))
}

pub fn encode_status(status: MatchupStatus) -> &'static str { status.as_str() }

pub fn decode_status(s: &str) -> Result<MatchupStatus> {
  match s {
    "pending" => Ok(MatchupStatus::Pending),
    "active" => Ok(MatchupStatus::Active),
    "closed" => Ok(MatchupStatus::Closed),
    other => Err(Error::Decode(format!("unknown matchup status: {other:?}"))),
  }
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// Column list matching [`RawMatchup::from_row`].
pub const MATCHUP_COLUMNS: &str =
  "matchup_id, week_start, option_a_ref, option_b_ref, status, created_at";

/// Undecoded `matchups` row.
pub struct RawMatchup {
  pub matchup_id:   String,
  pub week_start:   String,
  pub option_a_ref: Option<String>,
  pub option_b_ref: Option<String>,
  pub status:       String,
  pub created_at:   String,
}

impl RawMatchup {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      matchup_id:   row.get(0)?,
      week_start:   row.get(1)?,
      option_a_ref: row.get(2)?,
      option_b_ref: row.get(3)?,
      status:       row.get(4)?,
      created_at:   row.get(5)?,
    })
  }

  pub fn into_matchup(self) -> Result<Matchup> {
    Ok(Matchup {
      matchup_id:   Uuid::parse_str(&self.matchup_id)?,
      week_start:   decode_week(&self.week_start)?,
      option_a_ref: self.option_a_ref,
      option_b_ref: self.option_b_ref,
      status:       decode_status(&self.status)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawItem::from_row`].
pub const ITEM_COLUMNS: &str = "item_id, title, image_url, added_at";

/// Undecoded `items` row.
pub struct RawItem {
  pub item_id:   String,
  pub title:     Option<String>,
  pub image_url: Option<String>,
  pub added_at:  String,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      item_id:   row.get(0)?,
      title:     row.get(1)?,
      image_url: row.get(2)?,
      added_at:  row.get(3)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      item_id:   self.item_id,
      title:     self.title,
      image_url: self.image_url,
      added_at:  decode_dt(&self.added_at)?,
    })
  }
}

// ─── Constraint errors ───────────────────────────────────────────────────────

/// `true` if `e` is a UNIQUE or PRIMARY KEY constraint violation.
pub fn is_unique_violation(e: &rusqlite::Error) -> bool {
  match e {
    rusqlite::Error::SqliteFailure(err, _) => matches!(
      err.extended_code,
      rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    ),
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamps_have_fixed_width() {
    let whole = DateTime::parse_from_rfc3339("2025-01-06T00:00:00Z")
      .unwrap()
      .with_timezone(&Utc);
    let fractional = DateTime::parse_from_rfc3339("2025-01-06T00:00:00.5Z")
      .unwrap()
      .with_timezone(&Utc);
    assert_eq!(encode_dt(whole).len(), encode_dt(fractional).len());
    assert!(encode_dt(whole) < encode_dt(fractional));
    assert_eq!(decode_dt(&encode_dt(fractional)).unwrap(), fractional);
  }

  #[test]
  fn unknown_status_is_a_decode_error() {
    assert!(matches!(decode_status("archived"), Err(Error::Decode(_))));
    assert_eq!(decode_status("active").unwrap(), MatchupStatus::Active);
  }
}
