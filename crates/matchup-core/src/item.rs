//! Items — the photos a matchup compares.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An eligible photo. `item_id` is what a matchup's option refs point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub item_id:   String,
  pub title:     Option<String>,
  pub image_url: Option<String>,
  pub added_at:  DateTime<Utc>,
}

/// Input for [`MatchupStore::add_item`](crate::store::MatchupStore::add_item).
#[derive(Debug, Clone)]
pub struct NewItem {
  pub item_id:   String,
  pub title:     Option<String>,
  pub image_url: Option<String>,
}

impl NewItem {
  pub fn new(item_id: impl Into<String>) -> Self {
    Self {
      item_id:   item_id.into(),
      title:     None,
      image_url: None,
    }
  }
}
