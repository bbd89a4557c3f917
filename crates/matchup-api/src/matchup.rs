//! Handler for `GET /current-matchup`.

use axum::{Json, extract::State};
use matchup_core::{
  item::Item,
  resolver::{self, CurrentMatchup},
  store::MatchupStore,
  week::WeekStart,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct CurrentMatchupResponse {
  pub ok:         bool,
  /// `null` for a fallback pairing.
  pub week_start: Option<WeekStart>,
  pub matchup_id: Option<Uuid>,
  pub votable:    bool,
  pub items:      Vec<Item>,
}

impl From<CurrentMatchup> for CurrentMatchupResponse {
  fn from(current: CurrentMatchup) -> Self {
    let week_start = current.votable_week();
    let matchup_id = current.matchup_id();
    Self {
      ok: true,
      week_start,
      matchup_id,
      votable: week_start.is_some(),
      items: current.into_items(),
    }
  }
}

/// `GET /current-matchup`
pub async fn current<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<CurrentMatchupResponse>, ApiError>
where
  S: MatchupStore,
{
  let current = resolver::resolve_current(state.store.as_ref()).await?;
  Ok(Json(current.into()))
}
