//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, calendar dates as ISO
//! 8601. UUIDs are stored as hyphenated lowercase strings. Ratings are
//! plain INTEGER columns.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use arcadia_core::{
  catalog::Game,
  review::{RatingAttribute, Ratings, Review},
  user::{Role, User},
};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|e: chrono::ParseError| Error::DateParse(e.to_string()))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str {
  match r {
    Role::User => "user",
    Role::Admin => "admin",
  }
}

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "user" => Ok(Role::User),
    "admin" => Ok(Role::Admin),
    other => Err(Error::Decode(format!("unknown role: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub username:      String,
  pub password_hash: String,
  pub role:          String,
  pub created_at:    String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      username:      self.username,
      password_hash: self.password_hash,
      role:          decode_role(&self.role)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `games` row.
pub struct RawGame {
  pub game_id:      String,
  pub title:        String,
  pub description:  Option<String>,
  pub price:        i64,
  pub image_url:    Option<String>,
  pub developer:    Option<String>,
  pub release_date: Option<String>,
  pub created_at:   String,
}

impl RawGame {
  /// Read the eight `games` columns starting at `offset` in a row.
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      game_id:      row.get(offset)?,
      title:        row.get(offset + 1)?,
      description:  row.get(offset + 2)?,
      price:        row.get(offset + 3)?,
      image_url:    row.get(offset + 4)?,
      developer:    row.get(offset + 5)?,
      release_date: row.get(offset + 6)?,
      created_at:   row.get(offset + 7)?,
    })
  }

  pub fn into_game(self) -> Result<Game> {
    Ok(Game {
      game_id:      decode_uuid(&self.game_id)?,
      title:        self.title,
      description:  self.description,
      price:        self.price,
      image_url:    self.image_url,
      developer:    self.developer,
      release_date: self.release_date.as_deref().map(decode_date).transpose()?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawGame::from_row`], for embedding in SELECTs.
pub const GAME_COLUMNS: &str =
  "game_id, title, description, price, image_url, developer, release_date, \
   created_at";

/// Raw values read from a `reviews` row. Absent optional columns are
/// selected as NULL/0 aliases so the row shape is uniform across schema
/// versions; `ratings` holds the eight vocabulary slots in
/// [`RatingAttribute::ALL`] order.
pub struct RawReview {
  pub review_id:    String,
  pub user_id:      String,
  pub game_id:      String,
  pub comment:      String,
  pub is_hidden:    bool,
  pub report_count: i64,
  pub created_at:   String,
  pub ratings:      Vec<Option<i64>>,
}

impl RawReview {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let mut ratings = Vec::with_capacity(RatingAttribute::ALL.len());
    for i in 0..RatingAttribute::ALL.len() {
      ratings.push(row.get(7 + i)?);
    }
    Ok(Self {
      review_id:    row.get(0)?,
      user_id:      row.get(1)?,
      game_id:      row.get(2)?,
      comment:      row.get(3)?,
      is_hidden:    row.get(4)?,
      report_count: row.get(5)?,
      created_at:   row.get(6)?,
      ratings,
    })
  }

  pub fn into_review(self) -> Result<Review> {
    let mut ratings = Ratings::new();
    for (attr, value) in RatingAttribute::ALL.into_iter().zip(self.ratings) {
      if let Some(v) = value {
        let v = u8::try_from(v).map_err(|_| {
          Error::Decode(format!("rating {} out of range: {v}", attr.column_name()))
        })?;
        ratings.insert(attr, v);
      }
    }

    Ok(Review {
      review_id:    decode_uuid(&self.review_id)?,
      user_id:      decode_uuid(&self.user_id)?,
      game_id:      decode_uuid(&self.game_id)?,
      comment:      self.comment,
      ratings,
      is_hidden:    self.is_hidden,
      report_count: self.report_count,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
