//! [`SqliteStore`] — the SQLite implementation of [`MatchupStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use matchup_core::{
  ballot::{Choice, Vote, VoteInsert},
  fingerprint::Fingerprint,
  item::{Item, NewItem},
  matchup::{Matchup, MatchupStatus, NewMatchup},
  store::MatchupStore,
  tally::Totals,
  week::WeekStart,
};

use crate::{
  encode::{
    encode_dt, encode_status, encode_uuid, encode_week, is_unique_violation, ITEM_COLUMNS,
    MATCHUP_COLUMNS, RawItem, RawMatchup,
  },
  schema::SCHEMA,
  Error, Result,
};

/// Result of a write that can trip a uniqueness constraint.
enum Write {
  Done,
  /// No row matched the statement's guard.
  Missed,
  /// The write hit a UNIQUE constraint.
  Conflict,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A matchup store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements run on one connection thread, in submission order.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch at most one matchup. `filter` may bind a single `?1`.
  async fn query_matchup(
    &self,
    filter: &'static str,
    param: Option<String>,
  ) -> Result<Option<Matchup>> {
    let raw: Option<RawMatchup> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {MATCHUP_COLUMNS} FROM matchups {filter} LIMIT 1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(param.iter()), RawMatchup::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMatchup::into_matchup).transpose()
  }

  async fn require_matchup(&self, week: WeekStart) -> Result<Matchup> {
    self
      .get_matchup(week)
      .await?
      .ok_or(Error::MatchupNotFound(week))
  }
}

// ─── MatchupStore impl ───────────────────────────────────────────────────────

impl MatchupStore for SqliteStore {
  type Error = Error;

  // ── Matchups ──────────────────────────────────────────────────────────────

  async fn create_matchup(&self, input: NewMatchup) -> Result<Matchup> {
    let status = input.initial_status()?;
    let matchup = Matchup {
      matchup_id:   Uuid::new_v4(),
      week_start:   input.week_start,
      option_a_ref: input.option_a_ref,
      option_b_ref: input.option_b_ref,
      status,
      created_at:   Utc::now(),
    };

    let id_str     = encode_uuid(matchup.matchup_id);
    let week_str   = encode_week(matchup.week_start);
    let a_ref      = matchup.option_a_ref.clone();
    let b_ref      = matchup.option_b_ref.clone();
    let status_str = encode_status(status);
    let at_str     = encode_dt(matchup.created_at);

    let write = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO matchups (
             matchup_id, week_start, option_a_ref, option_b_ref, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, week_str, a_ref, b_ref, status_str, at_str],
        );
        match inserted {
          Ok(_) => Ok(Write::Done),
          Err(e) if is_unique_violation(&e) => {
            // Either the week is taken or another matchup is already active.
            let week_taken = conn
              .query_row(
                "SELECT 1 FROM matchups WHERE week_start = ?1",
                rusqlite::params![week_str],
                |_| Ok(()),
              )
              .optional()?
              .is_some();
            Ok(if week_taken { Write::Conflict } else { Write::Missed })
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match write {
      Write::Done => Ok(matchup),
      Write::Conflict => Err(Error::WeekTaken(matchup.week_start)),
      Write::Missed => Err(Error::ActiveMatchupExists),
    }
  }

  async fn get_matchup(&self, week: WeekStart) -> Result<Option<Matchup>> {
    self
      .query_matchup("WHERE week_start = ?1", Some(encode_week(week)))
      .await
  }

  async fn list_matchups(&self) -> Result<Vec<Matchup>> {
    let raws: Vec<RawMatchup> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MATCHUP_COLUMNS} FROM matchups ORDER BY week_start DESC"
        ))?;
        let rows = stmt
          .query_map([], RawMatchup::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMatchup::into_matchup).collect()
  }

  async fn set_options(
    &self,
    week: WeekStart,
    option_a_ref: String,
    option_b_ref: String,
  ) -> Result<Matchup> {
    let week_str = encode_week(week);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE matchups SET option_a_ref = ?2, option_b_ref = ?3
           WHERE week_start = ?1 AND status = 'pending'",
          rusqlite::params![week_str, option_a_ref, option_b_ref],
        )?)
      })
      .await?;

    let matchup = self.require_matchup(week).await?;
    if changed == 0 {
      return Err(Error::NotPending(week));
    }
    Ok(matchup)
  }

  async fn set_status(&self, week: WeekStart, status: MatchupStatus) -> Result<Matchup> {
    let current = self.require_matchup(week).await?;
    current.check_transition(status)?;

    let week_str = encode_week(week);
    let from_str = encode_status(current.status);
    let to_str   = encode_status(status);

    // Compare-and-set on the status we validated against.
    let write = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE matchups SET status = ?2 WHERE week_start = ?1 AND status = ?3",
          rusqlite::params![week_str, to_str, from_str],
        );
        match updated {
          Ok(0) => Ok(Write::Missed),
          Ok(_) => Ok(Write::Done),
          Err(e) if is_unique_violation(&e) => Ok(Write::Conflict),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match write {
      Write::Done => Ok(Matchup { status, ..current }),
      Write::Missed => Err(Error::StatusChanged(week)),
      Write::Conflict => Err(Error::ActiveMatchupExists),
    }
  }

  async fn active_matchup(&self) -> Result<Option<Matchup>> {
    self
      .query_matchup("WHERE status = 'active' ORDER BY week_start DESC", None)
      .await
  }

  async fn last_closed_matchup(&self) -> Result<Option<Matchup>> {
    self
      .query_matchup("WHERE status = 'closed' ORDER BY week_start DESC", None)
      .await
  }

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn add_item(&self, input: NewItem) -> Result<Item> {
    let item = Item {
      item_id:   input.item_id,
      title:     input.title,
      image_url: input.image_url,
      added_at:  Utc::now(),
    };

    let id_str    = item.item_id.clone();
    let title     = item.title.clone();
    let image_url = item.image_url.clone();
    let at_str    = encode_dt(item.added_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let result = conn.execute(
          "INSERT INTO items (item_id, title, image_url, added_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, title, image_url, at_str],
        );
        match result {
          Ok(_) => Ok(true),
          Err(e) if is_unique_violation(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if inserted {
      Ok(item)
    } else {
      Err(Error::ItemTaken(item.item_id))
    }
  }

  async fn get_items(&self, refs: &[String]) -> Result<Vec<Item>> {
    let refs = refs.to_vec();

    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"
        ))?;
        let mut found = Vec::with_capacity(refs.len());
        for item_ref in &refs {
          if let Some(raw) = stmt
            .query_row(rusqlite::params![item_ref], RawItem::from_row)
            .optional()?
          {
            found.push(raw);
          }
        }
        Ok(found)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  async fn recent_items(&self, limit: usize) -> Result<Vec<Item>> {
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM items ORDER BY added_at DESC, rowid DESC LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  // ── Ledger ────────────────────────────────────────────────────────────────

  async fn insert_vote(
    &self,
    week: WeekStart,
    choice: Choice,
    fingerprint: Fingerprint,
  ) -> Result<VoteInsert> {
    let vote = Vote {
      week_start:        week,
      choice,
      voter_fingerprint: fingerprint,
      cast_at:           Utc::now(),
    };

    let week_str   = encode_week(week);
    let choice_str = choice.as_str();
    let fp_str     = vote.voter_fingerprint.as_str().to_owned();
    let at_str     = encode_dt(vote.cast_at);

    // One statement: the active check and the insert cannot interleave with
    // another writer, and a duplicate surfaces as a UNIQUE violation.
    let write = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO votes (week_start, choice, voter_fingerprint, cast_at)
           SELECT ?1, ?2, ?3, ?4
           WHERE EXISTS (
             SELECT 1 FROM matchups WHERE week_start = ?1 AND status = 'active'
           )",
          rusqlite::params![week_str, choice_str, fp_str, at_str],
        );
        match inserted {
          Ok(0) => Ok(Write::Missed),
          Ok(_) => Ok(Write::Done),
          Err(e) if is_unique_violation(&e) => Ok(Write::Conflict),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(match write {
      Write::Done => VoteInsert::Recorded(vote),
      Write::Conflict => VoteInsert::Duplicate,
      Write::Missed => VoteInsert::NotActive,
    })
  }

  async fn tally(&self, week: WeekStart) -> Result<Totals> {
    let week_str = encode_week(week);

    let (a, b): (i64, i64) = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(SUM(choice = 'a'), 0), COALESCE(SUM(choice = 'b'), 0)
           FROM votes WHERE week_start = ?1",
          rusqlite::params![week_str],
          |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
      })
      .await?;

    Ok(Totals {
      a: u64::try_from(a).unwrap_or_default(),
      b: u64::try_from(b).unwrap_or_default(),
    })
  }

  async fn count_votes(&self, week: WeekStart) -> Result<u64> {
    let week_str = encode_week(week);

    let rows: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM votes WHERE week_start = ?1",
          rusqlite::params![week_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(u64::try_from(rows).unwrap_or_default())
  }
}
