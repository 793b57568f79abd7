//! Handlers for purchase and wishlist endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/purchases` | Body: [`AddBody`]; duplicate is a 409 |
//! | `POST` | `/wishlist` | Body: [`AddBody`]; duplicate is a 200 `already_present` |
//! | `DELETE` | `/wishlist/:game_id` | Removes the entry if present |
//! | `GET`  | `/me/purchases` | Caller's library |
//! | `GET`  | `/me/wishlist` | Caller's wishlist |

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
  commerce::{AddOutcome, PurchasedGame, WishedGame},
  store::MarketStore,
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// JSON body accepted by `POST /purchases` and `POST /wishlist`.
#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub game_id: Option<Uuid>,
}

/// `POST /purchases` — a repeat purchase of the same game is a conflict.
pub async fn purchase<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Json(body): Json<AddBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let game_id = body.game_id.ok_or(CoreError::MissingField("game_id"))?;
  match state.store.add_purchase(user.user_id, game_id).await? {
    AddOutcome::Added => Ok((StatusCode::CREATED, Json(AddOutcome::Added))),
    AddOutcome::AlreadyPresent => {
      Err(ApiError::Conflict(format!("game {game_id} already purchased")))
    }
  }
}

/// `POST /wishlist` — a repeat add acknowledges `already_present` without
/// erroring.
pub async fn wishlist_add<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Json(body): Json<AddBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let game_id = body.game_id.ok_or(CoreError::MissingField("game_id"))?;
  let outcome = state.store.add_wish(user.user_id, game_id).await?;
  let status = match outcome {
    AddOutcome::Added => StatusCode::CREATED,
    AddOutcome::AlreadyPresent => StatusCode::OK,
  };
  Ok((status, Json(outcome)))
}

/// `DELETE /wishlist/:game_id`
pub async fn wishlist_remove<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
  Path(game_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  state.store.remove_wish(user.user_id, game_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /me/purchases`
pub async fn my_purchases<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
) -> Result<Json<Vec<PurchasedGame>>, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.list_purchases(user.user_id).await?))
}

/// `GET /me/wishlist`
pub async fn my_wishlist<S>(
  State(state): State<AppState<S>>,
  Authenticated(user): Authenticated,
) -> Result<Json<Vec<WishedGame>>, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.store.list_wishlist(user.user_id).await?))
}
