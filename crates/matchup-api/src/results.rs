//! Handler for `GET /results`.
//!
//! This is a read path: storage failures degrade to zero totals and a null
//! `last_week` instead of failing the page.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use matchup_core::{
  store::MatchupStore,
  tally::{self, ClosedResult, Totals},
  week::WeekStart,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct ResultsParams {
  /// Defaults to the active matchup's week.
  pub week_start: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
  pub ok:         bool,
  pub week_start: Option<WeekStart>,
  pub totals:     Totals,
  pub last_week:  Option<ClosedResult>,
}

/// `GET /results[?week_start=YYYY-MM-DD]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<ResultsParams>, QueryRejection>,
) -> Result<Json<ResultsResponse>, ApiError>
where
  S: MatchupStore,
{
  let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;
  let requested = params
    .week_start
    .as_deref()
    .filter(|raw| !raw.is_empty())
    .map(WeekStart::parse)
    .transpose()?;

  let store = state.store.as_ref();
  let week_start = match requested {
    Some(week) => Some(week),
    None => active_week(store).await,
  };

  let totals = match week_start {
    Some(week) => tally::totals(store, week).await.unwrap_or_else(|e| {
      tracing::warn!(%week, error = %e, "tally failed, reporting zero totals");
      Totals::default()
    }),
    None => Totals::default(),
  };

  let last_week = tally::last_closed_result(store).await.unwrap_or_else(|e| {
    tracing::warn!(error = %e, "last closed result unavailable");
    None
  });

  Ok(Json(ResultsResponse {
    ok: true,
    week_start,
    totals,
    last_week,
  }))
}

async fn active_week<S: MatchupStore>(store: &S) -> Option<WeekStart> {
  match store.active_matchup().await {
    Ok(matchup) => matchup.map(|m| m.week_start),
    Err(e) => {
      tracing::warn!(error = %e, "active matchup lookup failed");
      None
    }
  }
}
