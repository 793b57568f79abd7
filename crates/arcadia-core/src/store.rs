//! The `MarketStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `arcadia-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  catalog::{Game, GameUpdate, NewGame},
  commerce::{AddOutcome, PurchasedGame, WishedGame},
  review::{NewReport, NewReview, Report, Review, SchemaCapabilities},
  user::{NewUser, User},
};

/// Abstraction over an Arcadia storage backend.
///
/// The store is the single source of truth and the sole synchronisation
/// point: guard queries and their corresponding writes run as separate
/// statements, so uniqueness invariants ((user, game) for purchases, wishes,
/// and reviews) are enforced by storage-level constraints, not by the
/// preceding existence checks.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait MarketStore: Send + Sync {
  // ── Users ─────────────────────────────────────────────────────────────

  /// Create an account. Fails with [`crate::Error::UsernameTaken`] if the
  /// username is in use.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  /// Look up an account by username, including its credential hash.
  /// Returns `None` if not found.
  fn find_user<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>>> + Send + 'a;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Add a catalog entry.
  fn add_game(
    &self,
    input: NewGame,
  ) -> impl Future<Output = Result<Game>> + Send + '_;

  /// Retrieve a catalog entry. Returns `None` if not found.
  fn get_game(
    &self,
    game_id: Uuid,
  ) -> impl Future<Output = Result<Option<Game>>> + Send + '_;

  /// List catalog entries, newest first.
  fn list_games(
    &self,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<Game>>> + Send + '_;

  /// Replace every listing field of a catalog entry.
  /// Fails with [`crate::Error::GameNotFound`] if the entry is missing.
  fn update_game(
    &self,
    game_id: Uuid,
    update: GameUpdate,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Purchases ─────────────────────────────────────────────────────────

  /// Record a purchase. Reads the game's current price (the game must
  /// exist) but persists only the membership tuple. Idempotent: a repeat
  /// insert reports [`AddOutcome::AlreadyPresent`] instead of duplicating
  /// the row, even under concurrent identical requests.
  fn add_purchase(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> impl Future<Output = Result<AddOutcome>> + Send + '_;

  /// Membership test on the purchase set. This is the entitlement check
  /// gating review creation.
  fn has_purchased(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> impl Future<Output = Result<bool>> + Send + '_;

  /// The user's library, newest purchase first.
  fn list_purchases(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<PurchasedGame>>> + Send + '_;

  // ── Wishlist ──────────────────────────────────────────────────────────

  /// Add a wishlist entry. Same idempotency contract as
  /// [`Self::add_purchase`]; the game must exist.
  fn add_wish(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> impl Future<Output = Result<AddOutcome>> + Send + '_;

  /// Remove a wishlist entry. Returns `false` if it was not present.
  fn remove_wish(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> impl Future<Output = Result<bool>> + Send + '_;

  /// Membership test on the wishlist set.
  fn has_wish(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> impl Future<Output = Result<bool>> + Send + '_;

  /// The user's wishlist, newest entry first.
  fn list_wishlist(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<WishedGame>>> + Send + '_;

  // ── Reviews ───────────────────────────────────────────────────────────

  /// The capability descriptor for the review relation, fixed at store
  /// open time.
  fn capabilities(&self) -> SchemaCapabilities;

  /// Create a review. Preconditions checked here, in order: the author
  /// purchased the game ([`crate::Error::NotPurchased`]) and has no
  /// existing review for it ([`crate::Error::DuplicateReview`]). Rating
  /// attributes the schema does not support are dropped, never an error.
  fn create_review(
    &self,
    input: NewReview,
  ) -> impl Future<Output = Result<Review>> + Send + '_;

  /// Membership test on the review set for the given author. Hidden and
  /// visible reviews both count.
  fn has_review(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> impl Future<Output = Result<bool>> + Send + '_;

  /// Retrieve a review regardless of visibility. Returns `None` if not
  /// found.
  fn get_review(
    &self,
    review_id: Uuid,
  ) -> impl Future<Output = Result<Option<Review>>> + Send + '_;

  /// Reviews for a game with `is_hidden = false`, newest first — the
  /// public read path.
  fn list_visible_reviews(
    &self,
    game_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Review>>> + Send + '_;

  /// All reviews written by a user, hidden included, newest first.
  fn list_user_reviews(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Review>>> + Send + '_;

  /// Set the moderation visibility state. Idempotent: hiding an
  /// already-hidden review (or showing a visible one) is a no-op success.
  /// Fails with [`crate::Error::ReviewNotFound`] if the review is missing.
  fn set_review_hidden(
    &self,
    review_id: Uuid,
    hidden: bool,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Delete a review owned by `requester`. Fails with
  /// [`crate::Error::NotReviewAuthor`] when it belongs to someone else.
  /// Filed reports outlive the review.
  fn delete_review(
    &self,
    review_id: Uuid,
    requester: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Report ledger ─────────────────────────────────────────────────────

  /// Append a report against an existing review, then best-effort
  /// increment the review's report counter. A failed increment is logged,
  /// not surfaced: the report itself is the primary, authoritative effect.
  fn file_report(
    &self,
    input: NewReport,
  ) -> impl Future<Output = Result<Report>> + Send + '_;

  /// The full ledger for one review, oldest first — the moderation audit
  /// read path. Reports survive deletion of the review they target.
  fn list_reports(
    &self,
    review_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Report>>> + Send + '_;
}
