//! The `MatchupStore` trait.
//!
//! Implemented by storage backends (e.g. `matchup-store-sqlite`). The
//! resolver, ledger and tally operations in this crate take a store as an
//! explicit argument and never hold one globally.

use std::future::Future;

use crate::{
  ballot::{Choice, VoteInsert},
  fingerprint::Fingerprint,
  item::{Item, NewItem},
  matchup::{Matchup, MatchupStatus, NewMatchup},
  tally::Totals,
  week::WeekStart,
};

/// Abstraction over a matchup store backend.
///
/// The store exclusively owns the matchup, item and vote tables. Votes are
/// append-only; matchups are never deleted.
pub trait MatchupStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Matchups ──────────────────────────────────────────────────────────

  /// Persist a new matchup. Fails if the week already has one.
  fn create_matchup(
    &self,
    input: NewMatchup,
  ) -> impl Future<Output = Result<Matchup, Self::Error>> + Send + '_;

  fn get_matchup(
    &self,
    week: WeekStart,
  ) -> impl Future<Output = Result<Option<Matchup>, Self::Error>> + Send + '_;

  /// All matchups, most recent week first.
  fn list_matchups(
    &self,
  ) -> impl Future<Output = Result<Vec<Matchup>, Self::Error>> + Send + '_;

  /// Replace both option refs. Only permitted while the matchup is pending.
  fn set_options(
    &self,
    week: WeekStart,
    option_a_ref: String,
    option_b_ref: String,
  ) -> impl Future<Output = Result<Matchup, Self::Error>> + Send + '_;

  /// Move a matchup along its lifecycle. See
  /// [`Matchup::check_transition`](crate::matchup::Matchup::check_transition).
  fn set_status(
    &self,
    week: WeekStart,
    status: MatchupStatus,
  ) -> impl Future<Output = Result<Matchup, Self::Error>> + Send + '_;

  /// The active matchup with the most recent `week_start`, if any.
  fn active_matchup(
    &self,
  ) -> impl Future<Output = Result<Option<Matchup>, Self::Error>> + Send + '_;

  /// The closed matchup with the most recent `week_start`, if any.
  fn last_closed_matchup(
    &self,
  ) -> impl Future<Output = Result<Option<Matchup>, Self::Error>> + Send + '_;

  // ── Items ─────────────────────────────────────────────────────────────

  fn add_item(
    &self,
    input: NewItem,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Look up items by id, in the order given. Unknown ids are skipped.
  fn get_items<'a>(
    &'a self,
    refs: &'a [String],
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + 'a;

  /// The most recently added items, newest first.
  fn recent_items(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  // ── Ledger ────────────────────────────────────────────────────────────

  /// Attempt to append one vote.
  ///
  /// The active-status check and the insert must be a single atomic step,
  /// and a duplicate (week, fingerprint) must be detected by the storage
  /// layer's uniqueness constraint rather than by a prior read.
  fn insert_vote(
    &self,
    week: WeekStart,
    choice: Choice,
    fingerprint: Fingerprint,
  ) -> impl Future<Output = Result<VoteInsert, Self::Error>> + Send + '_;

  /// Per-option vote counts for a week. Zero when there are no rows.
  fn tally(
    &self,
    week: WeekStart,
  ) -> impl Future<Output = Result<Totals, Self::Error>> + Send + '_;

  /// Number of ledger rows for a week, regardless of choice.
  fn count_votes(
    &self,
    week: WeekStart,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
