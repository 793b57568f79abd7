//! Reviews, reports, and the rating vocabulary.
//!
//! A review may only be written by a user who purchased the game, at most
//! once per (user, game) pair. Its optional rating sub-scores come from a
//! fixed vocabulary, but any given deployment's storage schema may expose
//! only a subset of it — see [`SchemaCapabilities`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Rating vocabulary ───────────────────────────────────────────────────────

/// An optional rating dimension. The serde name doubles as the storage
/// column name, so an attribute is addressed the same way in API payloads
/// and in the schema capability descriptor.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RatingAttribute {
  #[serde(rename = "rating_graphic")]
  Graphic,
  #[serde(rename = "rating_quality")]
  Quality,
  #[serde(rename = "rating_fun")]
  Fun,
  #[serde(rename = "rating_replay")]
  Replay,
  #[serde(rename = "rating_price")]
  Price,
  #[serde(rename = "rating_first_impression")]
  FirstImpression,
  #[serde(rename = "rating_access")]
  Access,
  #[serde(rename = "rating_competitive")]
  Competitive,
}

impl RatingAttribute {
  /// Every attribute in the vocabulary, in column order.
  pub const ALL: [RatingAttribute; 8] = [
    Self::Graphic,
    Self::Quality,
    Self::Fun,
    Self::Replay,
    Self::Price,
    Self::FirstImpression,
    Self::Access,
    Self::Competitive,
  ];

  /// The storage column (and wire) name for this attribute.
  /// Must match the `rename` serde attributes above.
  pub fn column_name(&self) -> &'static str {
    match self {
      Self::Graphic => "rating_graphic",
      Self::Quality => "rating_quality",
      Self::Fun => "rating_fun",
      Self::Replay => "rating_replay",
      Self::Price => "rating_price",
      Self::FirstImpression => "rating_first_impression",
      Self::Access => "rating_access",
      Self::Competitive => "rating_competitive",
    }
  }

  /// Reverse of [`Self::column_name`]. `None` for names outside the
  /// vocabulary — callers drop those rather than failing.
  pub fn from_column_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|a| a.column_name() == name)
  }
}

/// Rating sub-scores keyed by attribute, each in `1..=5`.
pub type Ratings = BTreeMap<RatingAttribute, u8>;

// ─── Schema capabilities ─────────────────────────────────────────────────────

/// Which optional review attributes the target storage schema actually
/// exposes. Built once when the store is opened, then consulted on every
/// write — attribute support is a configuration value, not a per-call
/// storage query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCapabilities {
  /// Storage schema version, for operator diagnostics.
  pub schema_version: u32,
  /// Rating columns present in the review relation.
  pub ratings:        BTreeSet<RatingAttribute>,
  /// Whether the review relation carries a report counter.
  pub report_count:   bool,
}

impl SchemaCapabilities {
  /// A schema exposing the full rating vocabulary and the report counter.
  pub fn full(schema_version: u32) -> Self {
    Self {
      schema_version,
      ratings: RatingAttribute::ALL.into_iter().collect(),
      report_count: true,
    }
  }

  /// The degraded descriptor used when introspection is unavailable: only
  /// mandatory fields are written, and the report counter is skipped.
  pub fn mandatory_only() -> Self {
    Self {
      schema_version: 0,
      ratings:        BTreeSet::new(),
      report_count:   false,
    }
  }

  pub fn supports(&self, attribute: RatingAttribute) -> bool {
    self.ratings.contains(&attribute)
  }
}

// ─── Review ──────────────────────────────────────────────────────────────────

/// A stored review. `is_hidden` is admin-controlled visibility state;
/// `report_count` is a derived counter maintained by the report ledger.
/// Neither affects the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
  pub review_id:    Uuid,
  pub user_id:      Uuid,
  pub game_id:      Uuid,
  pub comment:      String,
  /// Only the attributes the deployment's schema supports; everything else
  /// supplied at creation time was dropped.
  pub ratings:      Ratings,
  pub is_hidden:    bool,
  pub report_count: i64,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::MarketStore::create_review`].
/// `created_at` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewReview {
  pub user_id: Uuid,
  pub game_id: Uuid,
  pub comment: String,
  pub ratings: Ratings,
}

impl NewReview {
  /// Convenience constructor with no rating sub-scores.
  pub fn new(user_id: Uuid, game_id: Uuid, comment: impl Into<String>) -> Self {
    Self {
      user_id,
      game_id,
      comment: comment.into(),
      ratings: Ratings::new(),
    }
  }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// An abuse report filed against a review. Append-only; the same reporter
/// may file any number of reports against the same review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
  pub report_id:   Uuid,
  pub review_id:   Uuid,
  pub reporter_id: Uuid,
  pub reason:      String,
  pub detail:      Option<String>,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::MarketStore::file_report`].
#[derive(Debug, Clone)]
pub struct NewReport {
  pub review_id:   Uuid,
  pub reporter_id: Uuid,
  pub reason:      String,
  pub detail:      Option<String>,
}
