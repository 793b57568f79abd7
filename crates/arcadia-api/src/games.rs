//! Handlers for `/games` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/games` | Optional `?limit=`, default 100 |
//! | `GET`  | `/games/:id` | Game + visible reviews + caller's purchase flag |
//! | `POST` | `/games` | Admin; body: [`GameBody`] |
//! | `PUT`  | `/games/:id` | Admin; full listing replacement |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arcadia_core::{
  Error as CoreError,
  catalog::{Game, GameUpdate, NewGame},
  review::Review,
  store::MarketStore,
};

use crate::{
  AppState,
  auth::{MaybeAuthenticated, RequireAdmin},
  error::ApiError,
};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit: Option<u32>,
}

/// `GET /games[?limit=<n>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Game>>, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let games = state.store.list_games(params.limit.unwrap_or(100)).await?;
  Ok(Json(games))
}

// ─── Detail ──────────────────────────────────────────────────────────────────

/// The detail read model: the catalog entry, its publicly visible reviews,
/// and whether the caller owns it (always `false` for visitors).
#[derive(Debug, Serialize)]
pub struct GameDetail {
  pub game:      Game,
  pub reviews:   Vec<Review>,
  pub purchased: bool,
}

/// `GET /games/:id`
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  MaybeAuthenticated(user): MaybeAuthenticated,
  Path(game_id): Path<Uuid>,
) -> Result<Json<GameDetail>, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let game = state
    .store
    .get_game(game_id)
    .await?
    .ok_or(CoreError::GameNotFound(game_id))?;
  let reviews = state.store.list_visible_reviews(game_id).await?;
  let purchased = match user {
    Some(u) => state.store.has_purchased(u.user_id, game_id).await?,
    None => false,
  };

  Ok(Json(GameDetail { game, reviews, purchased }))
}

// ─── Create / update ─────────────────────────────────────────────────────────

/// JSON body accepted by `POST /games` and `PUT /games/:id`.
#[derive(Debug, Deserialize)]
pub struct GameBody {
  pub title:        Option<String>,
  pub description:  Option<String>,
  pub price:        Option<i64>,
  pub image_url:    Option<String>,
  pub developer:    Option<String>,
  pub release_date: Option<NaiveDate>,
}

fn required_title(body: &GameBody) -> Result<String, ApiError> {
  body
    .title
    .as_deref()
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_owned)
    .ok_or_else(|| CoreError::MissingField("title").into())
}

/// `POST /games` — returns 201 + the stored [`Game`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_admin): RequireAdmin,
  Json(body): Json<GameBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let title = required_title(&body)?;
  let game = state
    .store
    .add_game(NewGame {
      title,
      description:  body.description,
      price:        body.price.unwrap_or(0),
      image_url:    body.image_url,
      developer:    body.developer,
      release_date: body.release_date,
    })
    .await?;
  Ok((StatusCode::CREATED, Json(game)))
}

/// `PUT /games/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  RequireAdmin(_admin): RequireAdmin,
  Path(game_id): Path<Uuid>,
  Json(body): Json<GameBody>,
) -> Result<StatusCode, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let title = required_title(&body)?;
  state
    .store
    .update_game(game_id, GameUpdate {
      title,
      description:  body.description,
      price:        body.price.unwrap_or(0),
      image_url:    body.image_url,
      developer:    body.developer,
      release_date: body.release_date,
    })
    .await?;
  Ok(StatusCode::NO_CONTENT)
}
