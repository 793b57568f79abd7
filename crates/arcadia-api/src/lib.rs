//! JSON REST API for the Arcadia marketplace.
//!
//! Exposes an axum [`Router`] backed by any
//! [`arcadia_core::store::MarketStore`]. Requests authenticate with HTTP
//! Basic; the extractors in [`auth`] resolve credentials to an
//! [`arcadia_core::user::AuthenticatedUser`] that handlers pass into the
//! core operations.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, arcadia_api::router(state)).await?;
//! ```

pub mod auth;
pub mod commerce;
pub mod error;
pub mod games;
pub mod reviews;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};

use arcadia_core::store::MarketStore;

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: MarketStore> {
  pub store: Arc<S>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Catalog
    .route("/games", get(games::list::<S>).post(games::create::<S>))
    .route("/games/{id}", get(games::detail::<S>).put(games::update::<S>))
    // Reviews and moderation
    .route("/reviews", post(reviews::create::<S>))
    .route("/reviews/{id}", delete(reviews::delete_own::<S>))
    .route("/reviews/{id}/report", post(reviews::report::<S>))
    .route("/reviews/{id}/reports", get(reviews::list_reports::<S>))
    .route("/reviews/{id}/hide", post(reviews::hide::<S>))
    .route("/reviews/{id}/show", post(reviews::show::<S>))
    // Commerce
    .route("/purchases", post(commerce::purchase::<S>))
    .route("/wishlist", post(commerce::wishlist_add::<S>))
    .route("/wishlist/{game_id}", delete(commerce::wishlist_remove::<S>))
    // Caller-scoped reads
    .route("/me/reviews", get(reviews::list_mine::<S>))
    .route("/me/purchases", get(commerce::my_purchases::<S>))
    .route("/me/wishlist", get(commerce::my_wishlist::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
