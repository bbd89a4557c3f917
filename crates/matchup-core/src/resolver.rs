//! Resolution of "the current matchup".
//!
//! The primary path is the active matchup with the latest week. When there is
//! none, when it lacks an option, or when the store cannot answer, the two most
//! recently added items are offered instead as an unvotable fallback pairing.

use serde::Serialize;
use uuid::Uuid;

use crate::{Error, Result, item::Item, store::MatchupStore, week::WeekStart};

/// Number of items shown in a fallback pairing.
pub const FALLBACK_ITEMS: usize = 2;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurrentMatchup {
  /// A real matchup. `items` holds whichever of its two options could be
  /// found, in A, B order.
  Resolved {
    week_start: WeekStart,
    matchup_id: Uuid,
    items:      Vec<Item>,
  },
  /// An ad-hoc pairing with no voting identity.
  Fallback { items: Vec<Item> },
}

impl CurrentMatchup {
  /// The week a vote may be cast for. `None` for a fallback pairing.
  pub fn votable_week(&self) -> Option<WeekStart> {
    match self {
      Self::Resolved { week_start, .. } => Some(*week_start),
      Self::Fallback { .. } => None,
    }
  }

  pub fn matchup_id(&self) -> Option<Uuid> {
    match self {
      Self::Resolved { matchup_id, .. } => Some(*matchup_id),
      Self::Fallback { .. } => None,
    }
  }

  pub fn items(&self) -> &[Item] {
    match self {
      Self::Resolved { items, .. } | Self::Fallback { items } => items,
    }
  }

  pub fn into_items(self) -> Vec<Item> {
    match self {
      Self::Resolved { items, .. } | Self::Fallback { items } => items,
    }
  }
}

/// Work out what to show as the current matchup.
///
/// Failures on the primary path degrade to the fallback; only a failure of
/// the fallback query itself is returned.
pub async fn resolve_current<S: MatchupStore>(store: &S) -> Result<CurrentMatchup> {
  match resolve_active(store).await {
    Ok(Some(resolved)) => return Ok(resolved),
    Ok(None) => {}
    Err(e) => {
      tracing::warn!(error = %e, "active matchup lookup failed, using fallback pairing");
    }
  }

  let items = store.recent_items(FALLBACK_ITEMS).await.map_err(Error::store)?;
  Ok(CurrentMatchup::Fallback { items })
}

async fn resolve_active<S: MatchupStore>(store: &S) -> Result<Option<CurrentMatchup>, S::Error> {
  let Some(matchup) = store.active_matchup().await? else {
    return Ok(None);
  };
  let Some((a, b)) = matchup.option_refs() else {
    return Ok(None);
  };
  let refs = [a.to_owned(), b.to_owned()];
  let items = store.get_items(&refs).await?;

  Ok(Some(CurrentMatchup::Resolved {
    week_start: matchup.week_start,
    matchup_id: matchup.matchup_id,
    items,
  }))
}
