//! HTTP Basic-auth extractors.
//!
//! Credentials are resolved against the account table and verified with
//! argon2. Handlers never look at headers themselves — they receive an
//! [`AuthenticatedUser`] value, so every role and entitlement check
//! downstream is a pure function of its inputs.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use arcadia_core::{Error as CoreError, store::MarketStore, user::AuthenticatedUser};

use crate::{AppState, error::ApiError};

/// Present in a handler signature means the request carried valid
/// credentials; the inner value is the resolved identity.
pub struct Authenticated(pub AuthenticatedUser);

/// Like [`Authenticated`], but additionally requires the admin role.
pub struct RequireAdmin(pub AuthenticatedUser);

/// Optional identity for read paths that render differently for visitors
/// and owners. A missing Authorization header is fine; a present-but-wrong
/// one is still rejected.
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let header_val = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let encoded = header_val.strip_prefix("Basic ")?;
  let decoded = B64.decode(encoded).ok()?;
  let creds = String::from_utf8(decoded).ok()?;
  let (username, password) = creds.split_once(':')?;
  Some((username.to_owned(), password.to_owned()))
}

/// Verify credentials from headers and resolve the account they belong to.
pub async fn verify_auth<S>(
  headers: &HeaderMap,
  state: &AppState<S>,
) -> Result<AuthenticatedUser, ApiError>
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  let (username, password) =
    basic_credentials(headers).ok_or(ApiError::Unauthorized)?;

  let user = state
    .store
    .find_user(&username)
    .await?
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(AuthenticatedUser { user_id: user.user_id, role: user.role })
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    Ok(Self(verify_auth(&parts.headers, state).await?))
  }
}

impl<S> FromRequestParts<AppState<S>> for RequireAdmin
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let user = verify_auth(&parts.headers, state).await?;
    if !user.is_admin() {
      return Err(CoreError::AdminRequired.into());
    }
    Ok(Self(user))
  }
}

impl<S> FromRequestParts<AppState<S>> for MaybeAuthenticated
where
  S: MarketStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    if !parts.headers.contains_key(header::AUTHORIZATION) {
      return Ok(Self(None));
    }
    Ok(Self(Some(verify_auth(&parts.headers, state).await?)))
  }
}
