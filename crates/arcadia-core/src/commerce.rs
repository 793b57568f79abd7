//! Purchase and wishlist membership sets.
//!
//! Both are idempotent (user, game) sets backed by composite primary keys.
//! A purchase is created once and never mutated or removed — the price paid
//! is read from the catalog at purchase time but not persisted. A wish has
//! an independent lifecycle and can be removed by its owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Game;

/// Outcome of an idempotent set insertion. `AlreadyPresent` is a normal
/// business outcome, not a fault; callers decide whether to surface it as a
/// conflict (purchases) or an acknowledgement (wishlist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddOutcome {
  Added,
  AlreadyPresent,
}

impl AddOutcome {
  pub fn is_added(&self) -> bool { matches!(self, Self::Added) }
}

/// A purchase joined with its catalog entry, for the owner's library view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasedGame {
  pub game:         Game,
  pub purchased_at: DateTime<Utc>,
}

/// A wish joined with its catalog entry, for the owner's wishlist view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishedGame {
  pub game:       Game,
  pub created_at: DateTime<Utc>,
}
