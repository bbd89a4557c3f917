//! Handler for `POST /cast-vote`.
//!
//! Body: `{"week_start": "YYYY-MM-DD", "choice": "a" | "b"}`. A repeat vote
//! from the same voter in the same week answers `already_voted: true` with
//! status 200.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::{HeaderMap, HeaderName, header},
};
use matchup_core::{
  ballot::Choice,
  fingerprint::{Fingerprint, VoterSignals},
  ledger::{self, Ballot},
  store::MatchupStore,
  tally::{self, Totals},
  week::WeekStart,
};
use serde::{Deserialize, Serialize};

use crate::{ApiConfig, AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CastVoteBody {
  #[serde(default)]
  pub week_start: String,
  #[serde(default)]
  pub choice:     String,
}

#[derive(Debug, Serialize)]
pub struct CastVoteResponse {
  pub ok:            bool,
  pub week_start:    WeekStart,
  pub choice:        Choice,
  pub already_voted: bool,
  pub totals:        Totals,
}

/// Pull the anti-spam signals off the request. Values are kept verbatim.
pub fn voter_signals(headers: &HeaderMap, config: &ApiConfig) -> VoterSignals {
  let text = |name: &HeaderName| {
    headers
      .get(name)
      .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
  };
  VoterSignals {
    address:    text(&config.client_ip_header),
    user_agent: text(&header::USER_AGENT),
  }
}

/// `POST /cast-vote`
pub async fn cast<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  body: Result<Json<CastVoteBody>, JsonRejection>,
) -> Result<Json<CastVoteResponse>, ApiError>
where
  S: MatchupStore,
{
  let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
  let ballot = Ballot::parse(&body.week_start, &body.choice)?;

  let signals = voter_signals(&headers, &state.config);
  let fingerprint = Fingerprint::derive(ballot.week_start, &signals);

  let store = state.store.as_ref();
  let outcome = ledger::cast_vote(store, ballot, fingerprint).await?;
  let totals = tally::totals(store, outcome.week_start).await?;

  Ok(Json(CastVoteResponse {
    ok: true,
    week_start: outcome.week_start,
    choice: outcome.choice,
    already_voted: outcome.already_voted,
    totals,
  }))
}

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  #[test]
  fn signals_come_from_configured_headers() {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.1, 10.0.0.1"));
    headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
    headers.insert(header::USER_AGENT, HeaderValue::from_static("agent/2"));

    let signals = voter_signals(&headers, &ApiConfig::default());
    assert_eq!(signals.address.as_deref(), Some("203.0.113.1, 10.0.0.1"));
    assert_eq!(signals.user_agent.as_deref(), Some("agent/2"));

    let config = ApiConfig {
      client_ip_header: HeaderName::from_static("x-real-ip"),
    };
    let signals = voter_signals(&headers, &config);
    assert_eq!(signals.address.as_deref(), Some("198.51.100.4"));
  }

  #[test]
  fn missing_headers_are_absent() {
    let signals = voter_signals(&HeaderMap::new(), &ApiConfig::default());
    assert!(signals.address.is_none());
    assert!(signals.user_agent.is_none());
  }
}
