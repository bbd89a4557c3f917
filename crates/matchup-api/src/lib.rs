//! JSON API for the weekly photo matchup.
//!
//! Exposes an axum [`Router`] backed by any
//! [`MatchupStore`](matchup_core::store::MatchupStore). Handlers hold no state
//! of their own; every request goes to the store.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/current-matchup` | Active matchup, or an unvotable fallback pairing |
//! | `POST` | `/cast-vote` | Body: `{"week_start","choice"}`; 400 / 409 on rejection |
//! | `GET`  | `/results` | Optional `?week_start=`; includes the last closed week |
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", matchup_api::api_router(store.clone(), ApiConfig::default()))
//! ```

pub mod error;
pub mod matchup;
pub mod results;
pub mod vote;

use std::sync::Arc;

use axum::{
  Router,
  http::HeaderName,
  routing::{get, post},
};
use matchup_core::store::MatchupStore;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Request-boundary settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Header carrying the client network address, e.g. as set by a proxy.
  pub client_ip_header: HeaderName,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      client_ip_header: HeaderName::from_static("x-forwarded-for"),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: MatchupStore> {
  pub store:  Arc<S>,
  pub config: Arc<ApiConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, config: ApiConfig) -> Router<()>
where
  S: MatchupStore + Clone + Send + Sync + 'static,
{
  let state = AppState {
    store,
    config: Arc::new(config),
  };

  Router::new()
    .route("/current-matchup", get(matchup::current::<S>))
    .route("/cast-vote", post(vote::cast::<S>))
    .route("/results", get(results::handler::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
