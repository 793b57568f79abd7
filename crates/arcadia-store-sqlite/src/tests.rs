//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeSet;

use arcadia_core::{
  Error as CoreError,
  catalog::{Game, GameUpdate, NewGame},
  commerce::AddOutcome,
  review::{NewReport, NewReview, RatingAttribute, Review, SchemaCapabilities},
  store::MarketStore,
  user::{NewUser, Role, User},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn make_user(s: &SqliteStore, username: &str) -> User {
  s.add_user(NewUser {
    username:      username.into(),
    password_hash: "$argon2id$v=19$stub".into(),
    role:          Role::User,
  })
  .await
  .unwrap()
}

async fn make_game(s: &SqliteStore, title: &str) -> Game {
  s.add_game(NewGame {
    title:        title.into(),
    description:  Some("a game".into()),
    price:        1999,
    image_url:    None,
    developer:    Some("Studio".into()),
    release_date: None,
  })
  .await
  .unwrap()
}

fn report_input(review: &Review, reporter: Uuid) -> NewReport {
  NewReport {
    review_id:   review.review_id,
    reporter_id: reporter,
    reason:      "spam".into(),
    detail:      None,
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_find_user() {
  let s = store().await;

  let user = make_user(&s, "alice").await;
  assert_eq!(user.role, Role::User);

  let fetched = s.find_user("alice").await.unwrap().unwrap();
  assert_eq!(fetched.user_id, user.user_id);
  assert_eq!(fetched.password_hash, user.password_hash);
}

#[tokio::test]
async fn find_user_missing_returns_none() {
  let s = store().await;
  assert!(s.find_user("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_rejected() {
  let s = store().await;
  make_user(&s, "alice").await;

  let err = s
    .add_user(NewUser {
      username:      "alice".into(),
      password_hash: "$argon2id$v=19$stub".into(),
      role:          Role::Admin,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::UsernameTaken(name) if name == "alice"));
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_game() {
  let s = store().await;
  let game = make_game(&s, "Factory Sim").await;

  let fetched = s.get_game(game.game_id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Factory Sim");
  assert_eq!(fetched.price, 1999);
  assert_eq!(fetched.developer.as_deref(), Some("Studio"));
}

#[tokio::test]
async fn get_game_missing_returns_none() {
  let s = store().await;
  assert!(s.get_game(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_games_respects_limit() {
  let s = store().await;
  make_game(&s, "One").await;
  make_game(&s, "Two").await;
  make_game(&s, "Three").await;

  assert_eq!(s.list_games(100).await.unwrap().len(), 3);
  assert_eq!(s.list_games(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_game_replaces_listing_fields() {
  let s = store().await;
  let game = make_game(&s, "Old Title").await;

  s.update_game(game.game_id, GameUpdate {
    title:        "New Title".into(),
    description:  None,
    price:        2999,
    image_url:    None,
    developer:    None,
    release_date: None,
  })
  .await
  .unwrap();

  let fetched = s.get_game(game.game_id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "New Title");
  assert_eq!(fetched.price, 2999);
  // Absent optionals clear the stored value.
  assert!(fetched.description.is_none());
  assert!(fetched.developer.is_none());
}

#[tokio::test]
async fn update_missing_game_errors() {
  let s = store().await;
  let err = s
    .update_game(Uuid::new_v4(), GameUpdate {
      title:        "X".into(),
      description:  None,
      price:        0,
      image_url:    None,
      developer:    None,
      release_date: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::GameNotFound(_)));
}

// ─── Purchases ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_purchase_and_membership() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;

  assert!(!s.has_purchased(user.user_id, game.game_id).await.unwrap());

  let outcome = s.add_purchase(user.user_id, game.game_id).await.unwrap();
  assert_eq!(outcome, AddOutcome::Added);
  assert!(s.has_purchased(user.user_id, game.game_id).await.unwrap());
}

#[tokio::test]
async fn add_purchase_twice_reports_already_present() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;

  assert!(s.add_purchase(user.user_id, game.game_id).await.unwrap().is_added());
  let second = s.add_purchase(user.user_id, game.game_id).await.unwrap();
  assert_eq!(second, AddOutcome::AlreadyPresent);

  // Exactly one row survives.
  let library = s.list_purchases(user.user_id).await.unwrap();
  assert_eq!(library.len(), 1);
  assert_eq!(library[0].game.game_id, game.game_id);
}

#[tokio::test]
async fn purchase_of_unknown_game_errors() {
  let s = store().await;
  let user = make_user(&s, "alice").await;

  let err = s.add_purchase(user.user_id, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, CoreError::GameNotFound(_)));
}

// ─── Wishlist ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn wish_add_remove_roundtrip() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;

  assert!(s.add_wish(user.user_id, game.game_id).await.unwrap().is_added());
  assert!(s.has_wish(user.user_id, game.game_id).await.unwrap());
  assert_eq!(s.list_wishlist(user.user_id).await.unwrap().len(), 1);

  assert!(s.remove_wish(user.user_id, game.game_id).await.unwrap());
  assert!(!s.has_wish(user.user_id, game.game_id).await.unwrap());
  assert!(s.list_wishlist(user.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn wish_add_twice_yields_single_row() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;

  assert!(s.add_wish(user.user_id, game.game_id).await.unwrap().is_added());
  let second = s.add_wish(user.user_id, game.game_id).await.unwrap();
  assert_eq!(second, AddOutcome::AlreadyPresent);
  assert_eq!(s.list_wishlist(user.user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_absent_wish_returns_false() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;

  assert!(!s.remove_wish(user.user_id, game.game_id).await.unwrap());
}

#[tokio::test]
async fn wish_for_unknown_game_errors() {
  let s = store().await;
  let user = make_user(&s, "alice").await;

  let err = s.add_wish(user.user_id, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, CoreError::GameNotFound(_)));
}

// ─── Review creation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn review_requires_purchase() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;

  let err = s
    .create_review(NewReview::new(user.user_id, game.game_id, "nice"))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::NotPurchased { .. }));

  // No row was created.
  assert!(!s.has_review(user.user_id, game.game_id).await.unwrap());
  assert!(s.list_visible_reviews(game.game_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn second_review_for_same_game_conflicts() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();

  s.create_review(NewReview::new(user.user_id, game.game_id, "first"))
    .await
    .unwrap();

  let err = s
    .create_review(NewReview::new(user.user_id, game.game_id, "second"))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::DuplicateReview { .. }));

  // Count for the pair remains 1.
  assert_eq!(s.list_user_reviews(user.user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn review_persists_supported_ratings() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();

  let mut input = NewReview::new(user.user_id, game.game_id, "solid");
  input.ratings.insert(RatingAttribute::Fun, 5);
  input.ratings.insert(RatingAttribute::Graphic, 4);

  let review = s.create_review(input).await.unwrap();
  assert!(!review.is_hidden);
  assert_eq!(review.report_count, 0);

  let fetched = s.get_review(review.review_id).await.unwrap().unwrap();
  assert_eq!(fetched.comment, "solid");
  assert_eq!(fetched.ratings.get(&RatingAttribute::Fun), Some(&5));
  assert_eq!(fetched.ratings.get(&RatingAttribute::Graphic), Some(&4));
  assert_eq!(fetched.ratings.len(), 2);
}

#[tokio::test]
async fn review_with_empty_ratings_succeeds() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();

  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "no scores"))
    .await
    .unwrap();

  let fetched = s.get_review(review.review_id).await.unwrap().unwrap();
  assert!(fetched.ratings.is_empty());
}

#[tokio::test]
async fn reviews_by_different_users_coexist() {
  let s = store().await;
  let alice = make_user(&s, "alice").await;
  let bob = make_user(&s, "bob").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(alice.user_id, game.game_id).await.unwrap();
  s.add_purchase(bob.user_id, game.game_id).await.unwrap();

  s.create_review(NewReview::new(alice.user_id, game.game_id, "a"))
    .await
    .unwrap();
  s.create_review(NewReview::new(bob.user_id, game.game_id, "b"))
    .await
    .unwrap();

  assert_eq!(s.list_visible_reviews(game.game_id).await.unwrap().len(), 2);
}

// ─── Moderation ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn hide_and_show_review() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "hide me"))
    .await
    .unwrap();

  s.set_review_hidden(review.review_id, true).await.unwrap();

  // Absent from the visible listing, but the row itself is intact.
  assert!(s.list_visible_reviews(game.game_id).await.unwrap().is_empty());
  let hidden = s.get_review(review.review_id).await.unwrap().unwrap();
  assert!(hidden.is_hidden);
  assert_eq!(hidden.comment, "hide me");

  // Hiding an already-hidden review is a no-op success.
  s.set_review_hidden(review.review_id, true).await.unwrap();

  s.set_review_hidden(review.review_id, false).await.unwrap();
  assert_eq!(s.list_visible_reviews(game.game_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn hide_missing_review_errors() {
  let s = store().await;
  let err = s.set_review_hidden(Uuid::new_v4(), true).await.unwrap_err();
  assert!(matches!(err, CoreError::ReviewNotFound(_)));
}

#[tokio::test]
async fn hiding_does_not_touch_report_count() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let reporter = make_user(&s, "bob").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "meh"))
    .await
    .unwrap();

  s.file_report(report_input(&review, reporter.user_id)).await.unwrap();
  s.set_review_hidden(review.review_id, true).await.unwrap();

  let fetched = s.get_review(review.review_id).await.unwrap().unwrap();
  assert_eq!(fetched.report_count, 1);
}

// ─── Review deletion ─────────────────────────────────────────────────────────

#[tokio::test]
async fn author_can_delete_own_review() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "bye"))
    .await
    .unwrap();

  s.delete_review(review.review_id, user.user_id).await.unwrap();
  assert!(s.get_review(review.review_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_by_non_author_is_rejected() {
  let s = store().await;
  let alice = make_user(&s, "alice").await;
  let bob = make_user(&s, "bob").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(alice.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(alice.user_id, game.game_id, "mine"))
    .await
    .unwrap();

  let err = s.delete_review(review.review_id, bob.user_id).await.unwrap_err();
  assert!(matches!(err, CoreError::NotReviewAuthor(_)));
  assert!(s.get_review(review.review_id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_missing_review_errors() {
  let s = store().await;
  let err = s.delete_review(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, CoreError::ReviewNotFound(_)));
}

#[tokio::test]
async fn reports_survive_review_deletion() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let reporter = make_user(&s, "bob").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "gone soon"))
    .await
    .unwrap();

  s.file_report(report_input(&review, reporter.user_id)).await.unwrap();
  s.delete_review(review.review_id, user.user_id).await.unwrap();

  assert_eq!(s.list_reports(review.review_id).await.unwrap().len(), 1);
}

// ─── Report ledger ───────────────────────────────────────────────────────────

#[tokio::test]
async fn filing_reports_increments_counter() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let reporter = make_user(&s, "bob").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "spammy"))
    .await
    .unwrap();

  for _ in 0..3 {
    s.file_report(report_input(&review, reporter.user_id)).await.unwrap();
  }

  let fetched = s.get_review(review.review_id).await.unwrap().unwrap();
  assert_eq!(fetched.report_count, 3);

  // Same reporter, three ledger rows — no dedup.
  let ledger = s.list_reports(review.review_id).await.unwrap();
  assert_eq!(ledger.len(), 3);
  assert!(ledger.iter().all(|r| r.reporter_id == reporter.user_id));
}

#[tokio::test]
async fn report_against_missing_review_errors() {
  let s = store().await;
  let err = s
    .file_report(NewReport {
      review_id:   Uuid::new_v4(),
      reporter_id: Uuid::new_v4(),
      reason:      "spam".into(),
      detail:      None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::ReviewNotFound(_)));
}

#[tokio::test]
async fn report_reason_and_detail_roundtrip() {
  let s = store().await;
  let user = make_user(&s, "alice").await;
  let reporter = make_user(&s, "bob").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "offensive"))
    .await
    .unwrap();

  let report = s
    .file_report(NewReport {
      review_id:   review.review_id,
      reporter_id: reporter.user_id,
      reason:      "abuse".into(),
      detail:      Some("contains slurs".into()),
    })
    .await
    .unwrap();

  let ledger = s.list_reports(review.review_id).await.unwrap();
  assert_eq!(ledger.len(), 1);
  assert_eq!(ledger[0].report_id, report.report_id);
  assert_eq!(ledger[0].reason, "abuse");
  assert_eq!(ledger[0].detail.as_deref(), Some("contains slurs"));
}

// ─── Schema capabilities ─────────────────────────────────────────────────────

#[tokio::test]
async fn full_schema_supports_whole_vocabulary() {
  let s = store().await;
  assert_eq!(s.capabilities(), SchemaCapabilities::full(1));
}

/// Pre-seed a database whose `reviews` relation only carries a subset of
/// the rating vocabulary; `CREATE TABLE IF NOT EXISTS` leaves it untouched.
fn seed_drifted(path: &std::path::Path, reviews_ddl: &str) {
  let conn = rusqlite::Connection::open(path).unwrap();
  conn.execute_batch(reviews_ddl).unwrap();
}

#[tokio::test]
async fn drifted_schema_drops_unsupported_ratings() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("drifted.sqlite");
  seed_drifted(
    &path,
    "CREATE TABLE reviews (
       review_id    TEXT PRIMARY KEY,
       user_id      TEXT NOT NULL,
       game_id      TEXT NOT NULL,
       comment      TEXT NOT NULL,
       rating_fun   INTEGER,
       is_hidden    INTEGER NOT NULL DEFAULT 0,
       report_count INTEGER NOT NULL DEFAULT 0,
       created_at   TEXT NOT NULL,
       UNIQUE (user_id, game_id)
     );",
  );

  let s = SqliteStore::open(&path).await.unwrap();
  let caps = s.capabilities();
  assert_eq!(
    caps.ratings,
    BTreeSet::from([RatingAttribute::Fun]),
  );
  assert!(caps.report_count);

  let user = make_user(&s, "alice").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();

  // Graphic is outside this deployment's schema; the write must still
  // succeed, persisting only the supported subset.
  let mut input = NewReview::new(user.user_id, game.game_id, "adaptive");
  input.ratings.insert(RatingAttribute::Fun, 5);
  input.ratings.insert(RatingAttribute::Graphic, 4);

  let review = s.create_review(input).await.unwrap();
  let fetched = s.get_review(review.review_id).await.unwrap().unwrap();
  assert_eq!(fetched.ratings.get(&RatingAttribute::Fun), Some(&5));
  assert_eq!(fetched.ratings.len(), 1);
}

#[tokio::test]
async fn missing_report_counter_degrades_gracefully() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("no_counter.sqlite");
  seed_drifted(
    &path,
    "CREATE TABLE reviews (
       review_id  TEXT PRIMARY KEY,
       user_id    TEXT NOT NULL,
       game_id    TEXT NOT NULL,
       comment    TEXT NOT NULL,
       rating_fun INTEGER,
       is_hidden  INTEGER NOT NULL DEFAULT 0,
       created_at TEXT NOT NULL,
       UNIQUE (user_id, game_id)
     );",
  );

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(!s.capabilities().report_count);

  let user = make_user(&s, "alice").await;
  let reporter = make_user(&s, "bob").await;
  let game = make_game(&s, "Factory Sim").await;
  s.add_purchase(user.user_id, game.game_id).await.unwrap();
  let review = s
    .create_review(NewReview::new(user.user_id, game.game_id, "spammy"))
    .await
    .unwrap();

  // Reports are still filed; the counter reads as zero.
  s.file_report(report_input(&review, reporter.user_id)).await.unwrap();
  s.file_report(report_input(&review, reporter.user_id)).await.unwrap();

  assert_eq!(s.list_reports(review.review_id).await.unwrap().len(), 2);
  let fetched = s.get_review(review.review_id).await.unwrap().unwrap();
  assert_eq!(fetched.report_count, 0);
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[tokio::test]
async fn purchase_review_moderate_scenario() {
  let s = store().await;
  let u1 = make_user(&s, "u1").await;
  let g7 = make_game(&s, "G7").await;

  s.add_purchase(u1.user_id, g7.game_id).await.unwrap();

  let mut input = NewReview::new(u1.user_id, g7.game_id, "great game");
  input.ratings.insert(RatingAttribute::Fun, 5);
  let review = s.create_review(input).await.unwrap();

  assert_eq!(review.user_id, u1.user_id);
  assert_eq!(review.game_id, g7.game_id);
  assert_eq!(review.comment, "great game");
  assert!(!review.is_hidden);
  assert_eq!(review.report_count, 0);

  // A second submission is rejected.
  let err = s
    .create_review(NewReview::new(u1.user_id, g7.game_id, "again"))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::DuplicateReview { .. }));

  // Admin hides it: gone from the public listing, counter untouched.
  s.set_review_hidden(review.review_id, true).await.unwrap();
  assert!(s.list_visible_reviews(g7.game_id).await.unwrap().is_empty());
  let hidden = s.get_review(review.review_id).await.unwrap().unwrap();
  assert_eq!(hidden.report_count, 0);
}
