//! Handlers for `/reviews` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/reviews` | Body: [`CreateReviewBody`]; non-admin, purchase-gated |
//! | `DELETE` | `/reviews/:id` | Author only |
//! | `POST` | `/reviews/:id/report` | Body: [`ReportBody`] |
//! | `GET`  | `/reviews/:id/reports` | Admin audit of the report ledger |
//! | `POST` | `/reviews/:id/hide` | Admin; idempotent |
//! | `POST` | `/reviews/:id/show` | Admin; idempotent |
//! | `GET`  | `/me/reviews` | Caller's reviews, hidden included |

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use arcadia_core::{
  Error as CoreError,
  review::{NewReport, NewReview, RatingAttribute, Ratings, Report, Review},
  store::MarketStore,
};

use crate::{
  AppState,
  auth::{Authenticated, RequireAdmin},
  error::ApiError,
};

// ─── Create ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /reviews`. Rating keys use the attribute's
/// wire name (e.g. `"rating_fun"`); names outside the vocabulary are
/// dropped, not rejected.
#[derive(Debug, Deserialize)]
pub struct CreateReviewBody {
  pub game_id: Option<Uuid>,
  pub comment: Option<String>,
  #[serde(default)]
  pub ratings: BTreeMap<String, i64>,
}

fn parse_ratings(raw: &BTreeMap<String, i64>) -> Result<Ratings, ApiError> {
  let mut ratings = Ratings::new();
  for (name, value) in raw {
    let Some(attr) = RatingAttribute::from_column_name(name) else {
      continue;
    };
    if !(1..=5).contains(value) {
      return Err(
        CoreError::RatingOutOfRange {
          attribute: attr.column_name(),
          value:     *value,
        }
        .into(),
      );
    }
    ratings.insert(attr, *value as u8);
  }
  Ok(ratings)
}

/// `POST /reviews` — returns 201 + the stored [`Review`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Json(body): Json<CreateReviewBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  // Role gate comes before any input or entitlement checks.
  if user.is_admin() {
    return Err(CoreError::AdminsMayNotReview.into());
  }

  let game_id = body.game_id.ok_or(CoreError::MissingField("game_id"))?;
  let comment = body
    .comment
    .as_deref()
    .map(str::trim)
    .filter(|c| !c.is_empty())
    .ok_or(CoreError::MissingField("comment"))?
    .to_owned();
  let ratings = parse_ratings(&body.ratings)?;

  let review = state
    .store
    .create_review(NewReview { user_id: user.user_id, game_id, comment, ratings })
    .await?;
  Ok((StatusCode::CREATED, Json(review)))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /reviews/:id` — authors may remove their own review.
pub async fn delete_own<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Path(review_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  state.store.delete_review(review_id, user.user_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /reviews/:id/report`. Both fields optional;
/// the reason defaults to `"other"`.
#[derive(Debug, Deserialize)]
pub struct ReportBody {
  pub reason: Option<String>,
  pub detail: Option<String>,
}

/// `POST /reviews/:id/report` — returns 201 + the filed [`Report`].
pub async fn report<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Path(review_id): Path<Uuid>,
  Json(body): Json<ReportBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let reason = body
    .reason
    .map(|r| r.trim().to_owned())
    .filter(|r| !r.is_empty())
    .unwrap_or_else(|| "other".to_owned());
  let detail = body.detail.map(|d| d.trim().to_owned()).filter(|d| !d.is_empty());

  let report = state
    .store
    .file_report(NewReport {
      review_id,
      reporter_id: user.user_id,
      reason,
      detail,
    })
    .await?;
  Ok((StatusCode::CREATED, Json(report)))
}

/// `GET /reviews/:id/reports` — the full ledger for one review.
pub async fn list_reports<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_admin): RequireAdmin,
  Path(review_id): Path<Uuid>,
) -> Result<Json<Vec<Report>>, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.list_reports(review_id).await?))
}

// ─── Moderation ──────────────────────────────────────────────────────────────

/// `POST /reviews/:id/hide`
pub async fn hide<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_admin): RequireAdmin,
  Path(review_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  state.store.set_review_hidden(review_id, true).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /reviews/:id/show`
pub async fn show<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_admin): RequireAdmin,
  Path(review_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  state.store.set_review_hidden(review_id, false).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Own reviews ─────────────────────────────────────────────────────────────

/// `GET /me/reviews`
pub async fn list_mine<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
) -> Result<Json<Vec<Review>>, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.list_user_reviews(user.user_id).await?))
}
