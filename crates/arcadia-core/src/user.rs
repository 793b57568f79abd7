//! User identity and roles.
//!
//! Account registration and password handling live outside this crate; the
//! core only ever sees an [`AuthenticatedUser`] — the identity the transport
//! layer resolved for the current request — passed explicitly into every
//! operation that needs one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Admin,
}

/// The identity a request acts as. Resolved once at the transport boundary
/// and threaded through as a plain value, so entitlement and role checks are
/// pure functions of their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
  pub role:    Role,
}

impl AuthenticatedUser {
  pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

/// A stored account row. `password_hash` is an argon2 PHC string; it never
/// appears in API payloads.
#[derive(Debug, Clone)]
pub struct User {
  pub user_id:       Uuid,
  pub username:      String,
  pub password_hash: String,
  pub role:          Role,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::MarketStore::add_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub password_hash: String,
  pub role:          Role,
}
