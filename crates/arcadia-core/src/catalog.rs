//! Catalog items.
//!
//! The catalog is owned by an import pipeline outside this repository; the
//! core reads `game_id` and `price` and lets admins correct listing fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry. `price` is in integer minor units (e.g. cents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
  pub game_id:      Uuid,
  pub title:        String,
  pub description:  Option<String>,
  pub price:        i64,
  pub image_url:    Option<String>,
  pub developer:    Option<String>,
  pub release_date: Option<NaiveDate>,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::MarketStore::add_game`].
#[derive(Debug, Clone)]
pub struct NewGame {
  pub title:        String,
  pub description:  Option<String>,
  pub price:        i64,
  pub image_url:    Option<String>,
  pub developer:    Option<String>,
  pub release_date: Option<NaiveDate>,
}

/// Full-row replacement applied by
/// [`crate::store::MarketStore::update_game`]. Every listing field is
/// written; absent optionals clear the stored value.
#[derive(Debug, Clone)]
pub struct GameUpdate {
  pub title:        String,
  pub description:  Option<String>,
  pub price:        i64,
  pub image_url:    Option<String>,
  pub developer:    Option<String>,
  pub release_date: Option<NaiveDate>,
}
