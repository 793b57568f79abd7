//! Error types for `arcadia-core`.
//!
//! One variant per business rule that can refuse an operation, plus a
//! `Storage` catch-all for faults in the persistence layer. The HTTP layer
//! maps each variant onto a status code; nothing here knows about transport.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  // ── Authorization ─────────────────────────────────────────────────────
  #[error("user {user_id} has not purchased game {game_id}")]
  NotPurchased { user_id: Uuid, game_id: Uuid },

  #[error("administrators may not write reviews")]
  AdminsMayNotReview,

  #[error("admin role required")]
  AdminRequired,

  #[error("review {0} was written by another user")]
  NotReviewAuthor(Uuid),

  // ── Validation ────────────────────────────────────────────────────────
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("rating {attribute} must be between 1 and 5, got {value}")]
  RatingOutOfRange { attribute: &'static str, value: i64 },

  // ── Conflicts ─────────────────────────────────────────────────────────
  #[error("user {user_id} already has a review for game {game_id}")]
  DuplicateReview { user_id: Uuid, game_id: Uuid },

  #[error("username already taken: {0}")]
  UsernameTaken(String),

  // ── Missing entities ──────────────────────────────────────────────────
  #[error("game not found: {0}")]
  GameNotFound(Uuid),

  #[error("review not found: {0}")]
  ReviewNotFound(Uuid),

  // ── Persistence faults ────────────────────────────────────────────────
  #[error("storage fault: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
