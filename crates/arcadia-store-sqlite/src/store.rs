//! [`SqliteStore`] — the SQLite implementation of [`MarketStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use arcadia_core::{
  Error as CoreError, Result as CoreResult,
  catalog::{Game, GameUpdate, NewGame},
  commerce::{AddOutcome, PurchasedGame, WishedGame},
  review::{
    NewReport, NewReview, Ratings, RatingAttribute, Report, Review,
    SchemaCapabilities,
  },
  store::MarketStore,
  user::{NewUser, User},
};

use crate::{
  Error, Result, capabilities,
  encode::{
    GAME_COLUMNS, RawGame, RawReview, RawUser, decode_dt, decode_uuid,
    encode_date, encode_dt, encode_role, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Column list ─────────────────────────────────────────────────────────────

/// SELECT list for `reviews`, shaped by the capability descriptor: absent
/// optional columns are aliased to NULL/0 so the row layout is identical
/// across schema versions.
fn review_columns(caps: &SchemaCapabilities) -> String {
  let mut cols: Vec<String> = vec![
    "review_id".into(),
    "user_id".into(),
    "game_id".into(),
    "comment".into(),
    "is_hidden".into(),
    if caps.report_count {
      "report_count".into()
    } else {
      "0 AS report_count".into()
    },
    "created_at".into(),
  ];
  for attr in RatingAttribute::ALL {
    if caps.supports(attr) {
      cols.push(attr.column_name().into());
    } else {
      cols.push(format!("NULL AS {}", attr.column_name()));
    }
  }
  cols.join(", ")
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Arcadia marketplace store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The
/// capability descriptor is probed once here and fixed for the lifetime of
/// the store.
#[derive(Clone)]
pub struct SqliteStore {
  conn:         tokio_rusqlite::Connection,
  capabilities: SchemaCapabilities,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, run schema initialisation, and
  /// probe the capability descriptor.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::from_connection(conn).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::from_connection(conn).await
  }

  async fn from_connection(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;

    // Introspection is itself best-effort: if it fails, degrade to
    // mandatory-fields-only writes rather than refusing to open.
    let capabilities =
      match conn.call(|conn| Ok(capabilities::probe(conn)?)).await {
        Ok(caps) => caps,
        Err(e) => {
          tracing::warn!(
            error = %e,
            "review schema introspection failed; writing mandatory fields only"
          );
          SchemaCapabilities::mandatory_only()
        }
      };

    Ok(Self { conn, capabilities })
  }

  // ── Row helpers ───────────────────────────────────────────────────────

  async fn user_row(&self, username: &str) -> Result<Option<RawUser>> {
    let name = username.to_owned();
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username, password_hash, role, created_at
               FROM users WHERE username = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawUser {
                  user_id:       row.get(0)?,
                  username:      row.get(1)?,
                  password_hash: row.get(2)?,
                  role:          row.get(3)?,
                  created_at:    row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  async fn insert_user(&self, user: &User) -> Result<()> {
    let id_str   = encode_uuid(user.user_id);
    let username = user.username.clone();
    let hash     = user.password_hash.clone();
    let role_str = encode_role(user.role).to_owned();
    let at_str   = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, username, password_hash, role, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, username, hash, role_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_game(&self, game: &Game) -> Result<()> {
    let id_str      = encode_uuid(game.game_id);
    let title       = game.title.clone();
    let description = game.description.clone();
    let price       = game.price;
    let image_url   = game.image_url.clone();
    let developer   = game.developer.clone();
    let date_str    = game.release_date.map(encode_date);
    let at_str      = encode_dt(game.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO games (game_id, title, description, price, image_url,
                              developer, release_date, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str, title, description, price, image_url, developer, date_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn game_row(&self, game_id: Uuid) -> Result<Option<RawGame>> {
    let id_str = encode_uuid(game_id);
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = ?1"),
              rusqlite::params![id_str],
              |row| RawGame::from_row(row, 0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  async fn game_price(&self, game_id: Uuid) -> Result<Option<i64>> {
    let id_str = encode_uuid(game_id);
    let price = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT price FROM games WHERE game_id = ?1",
              rusqlite::params![id_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(price)
  }

  /// Membership test for a (user, game) pair against one of the set tables.
  async fn pair_exists(
    &self,
    sql: &'static str,
    user_id: Uuid,
    game_id: Uuid,
  ) -> Result<bool> {
    let user_str = encode_uuid(user_id);
    let game_str = encode_uuid(game_id);
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(sql, rusqlite::params![user_str, game_str], |_| Ok(true))
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  /// `INSERT OR IGNORE` of a (user, game, timestamp) tuple. Returns whether
  /// a row was actually inserted — zero rows changed is the authoritative
  /// already-present signal, even when two identical requests race.
  async fn insert_pair(
    &self,
    sql: &'static str,
    user_id: Uuid,
    game_id: Uuid,
  ) -> Result<bool> {
    let user_str = encode_uuid(user_id);
    let game_str = encode_uuid(game_id);
    let at_str   = encode_dt(Utc::now());
    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(sql, rusqlite::params![user_str, game_str, at_str])? > 0)
      })
      .await?;
    Ok(inserted)
  }

  /// Games joined with a membership table, newest membership first.
  /// The joined timestamp is selected as column 8.
  async fn joined_games(
    &self,
    sql: &'static str,
    user_id: Uuid,
  ) -> Result<Vec<(RawGame, String)>> {
    let user_str = encode_uuid(user_id);
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], |row| {
            Ok((RawGame::from_row(row, 0)?, row.get::<_, String>(8)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Fetch reviews with the capability-shaped column list and a caller
  /// supplied WHERE/ORDER suffix keyed on a single UUID.
  async fn select_reviews(
    &self,
    suffix: &'static str,
    key: Uuid,
  ) -> Result<Vec<RawReview>> {
    let columns = review_columns(&self.capabilities);
    let key_str = encode_uuid(key);
    let raws = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {columns} FROM reviews {suffix}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![key_str], |row| {
            RawReview::from_row(row)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(raws)
  }

  /// Insert a fully-built [`Review`]. The column list is assembled from the
  /// mandatory fields plus whatever ratings the review carries — by the
  /// time we get here those are already intersected with the capability
  /// descriptor, so every named column exists.
  async fn insert_review(&self, review: &Review) -> Result<()> {
    use rusqlite::types::Value;

    let mut columns: Vec<&'static str> = vec![
      "review_id",
      "user_id",
      "game_id",
      "comment",
      "is_hidden",
      "created_at",
    ];
    let mut values: Vec<Value> = vec![
      Value::Text(encode_uuid(review.review_id)),
      Value::Text(encode_uuid(review.user_id)),
      Value::Text(encode_uuid(review.game_id)),
      Value::Text(review.comment.clone()),
      Value::Integer(review.is_hidden as i64),
      Value::Text(encode_dt(review.created_at)),
    ];
    for (attr, value) in &review.ratings {
      columns.push(attr.column_name());
      values.push(Value::Integer(i64::from(*value)));
    }

    let placeholders = (1..=columns.len())
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "INSERT INTO reviews ({}) VALUES ({placeholders})",
      columns.join(", ")
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn review_author(&self, review_id: Uuid) -> Result<Option<String>> {
    let id_str = encode_uuid(review_id);
    let author = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id FROM reviews WHERE review_id = ?1",
              rusqlite::params![id_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(author)
  }

  async fn insert_report(&self, report: &Report) -> Result<()> {
    let id_str       = encode_uuid(report.report_id);
    let review_str   = encode_uuid(report.review_id);
    let reporter_str = encode_uuid(report.reporter_id);
    let reason       = report.reason.clone();
    let detail       = report.detail.clone();
    let at_str       = encode_dt(report.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reports (report_id, review_id, reporter_id, reason,
                                detail, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str, review_str, reporter_str, reason, detail, at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn increment_report_count(&self, review_id: Uuid) -> Result<()> {
    let id_str = encode_uuid(review_id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE reviews SET report_count = report_count + 1
           WHERE review_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── MarketStore impl ────────────────────────────────────────────────────────

impl MarketStore for SqliteStore {
  // ── Users ─────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> CoreResult<User> {
    let user = User {
      user_id:       Uuid::new_v4(),
      username:      input.username,
      password_hash: input.password_hash,
      role:          input.role,
      created_at:    Utc::now(),
    };

    match self.insert_user(&user).await {
      Ok(()) => Ok(user),
      Err(e) if e.is_unique_violation() => {
        Err(CoreError::UsernameTaken(user.username))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn find_user(&self, username: &str) -> CoreResult<Option<User>> {
    let raw = self.user_row(username).await?;
    raw
      .map(|r| r.into_user().map_err(CoreError::from))
      .transpose()
  }

  // ── Catalog ───────────────────────────────────────────────────────────

  async fn add_game(&self, input: NewGame) -> CoreResult<Game> {
    let game = Game {
      game_id:      Uuid::new_v4(),
      title:        input.title,
      description:  input.description,
      price:        input.price,
      image_url:    input.image_url,
      developer:    input.developer,
      release_date: input.release_date,
      created_at:   Utc::now(),
    };

    self.insert_game(&game).await?;
    Ok(game)
  }

  async fn get_game(&self, game_id: Uuid) -> CoreResult<Option<Game>> {
    let raw = self.game_row(game_id).await?;
    raw.map(|r| r.into_game().map_err(CoreError::from)).transpose()
  }

  async fn list_games(&self, limit: u32) -> CoreResult<Vec<Game>> {
    let raws: Vec<RawGame> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GAME_COLUMNS} FROM games
           ORDER BY created_at DESC LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |row| RawGame::from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::from)?;

    raws
      .into_iter()
      .map(|r| r.into_game().map_err(CoreError::from))
      .collect()
  }

  async fn update_game(
    &self,
    game_id: Uuid,
    update: GameUpdate,
  ) -> CoreResult<()> {
    let id_str      = encode_uuid(game_id);
    let title       = update.title;
    let description = update.description;
    let price       = update.price;
    let image_url   = update.image_url;
    let developer   = update.developer;
    let date_str    = update.release_date.map(encode_date);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE games
           SET title = ?2, description = ?3, price = ?4, image_url = ?5,
               developer = ?6, release_date = ?7
           WHERE game_id = ?1",
          rusqlite::params![
            id_str, title, description, price, image_url, developer, date_str,
          ],
        )?)
      })
      .await
      .map_err(Error::from)?;

    if changed == 0 {
      return Err(CoreError::GameNotFound(game_id));
    }
    Ok(())
  }

  // ── Purchases ─────────────────────────────────────────────────────────

  async fn add_purchase(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> CoreResult<AddOutcome> {
    // The current catalog price is read as of purchase time but not
    // persisted onto the purchase row.
    let price = self
      .game_price(game_id)
      .await?
      .ok_or(CoreError::GameNotFound(game_id))?;
    tracing::debug!(%user_id, %game_id, price, "recording purchase");

    let inserted = self
      .insert_pair(
        "INSERT OR IGNORE INTO purchases (user_id, game_id, purchased_at)
         VALUES (?1, ?2, ?3)",
        user_id,
        game_id,
      )
      .await?;

    Ok(if inserted { AddOutcome::Added } else { AddOutcome::AlreadyPresent })
  }

  async fn has_purchased(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> CoreResult<bool> {
    Ok(
      self
        .pair_exists(
          "SELECT 1 FROM purchases WHERE user_id = ?1 AND game_id = ?2",
          user_id,
          game_id,
        )
        .await?,
    )
  }

  async fn list_purchases(
    &self,
    user_id: Uuid,
  ) -> CoreResult<Vec<PurchasedGame>> {
    let rows = self
      .joined_games(
        "SELECT g.game_id, g.title, g.description, g.price, g.image_url,
                g.developer, g.release_date, g.created_at, p.purchased_at
         FROM purchases p
         JOIN games g ON g.game_id = p.game_id
         WHERE p.user_id = ?1
         ORDER BY p.purchased_at DESC",
        user_id,
      )
      .await?;

    rows
      .into_iter()
      .map(|(raw, at)| -> Result<PurchasedGame> {
        Ok(PurchasedGame {
          game:         raw.into_game()?,
          purchased_at: decode_dt(&at)?,
        })
      })
      .collect::<Result<Vec<_>>>()
      .map_err(CoreError::from)
  }

  // ── Wishlist ──────────────────────────────────────────────────────────

  async fn add_wish(
    &self,
    user_id: Uuid,
    game_id: Uuid,
  ) -> CoreResult<AddOutcome> {
    if self.get_game(game_id).await?.is_none() {
      return Err(CoreError::GameNotFound(game_id));
    }

    let inserted = self
      .insert_pair(
        "INSERT OR IGNORE INTO wishes (user_id, game_id, created_at)
         VALUES (?1, ?2, ?3)",
        user_id,
        game_id,
      )
      .await?;

    Ok(if inserted { AddOutcome::Added } else { AddOutcome::AlreadyPresent })
  }

  async fn remove_wish(&self, user_id: Uuid, game_id: Uuid) -> CoreResult<bool> {
    let user_str = encode_uuid(user_id);
    let game_str = encode_uuid(game_id);
    let removed = self
      .conn
      .call(move |conn| {
        Ok(
          conn.execute(
            "DELETE FROM wishes WHERE user_id = ?1 AND game_id = ?2",
            rusqlite::params![user_str, game_str],
          )? > 0,
        )
      })
      .await
      .map_err(Error::from)?;
    Ok(removed)
  }

  async fn has_wish(&self, user_id: Uuid, game_id: Uuid) -> CoreResult<bool> {
    Ok(
      self
        .pair_exists(
          "SELECT 1 FROM wishes WHERE user_id = ?1 AND game_id = ?2",
          user_id,
          game_id,
        )
        .await?,
    )
  }

  async fn list_wishlist(&self, user_id: Uuid) -> CoreResult<Vec<WishedGame>> {
    let rows = self
      .joined_games(
        "SELECT g.game_id, g.title, g.description, g.price, g.image_url,
                g.developer, g.release_date, g.created_at, w.created_at
         FROM wishes w
         JOIN games g ON g.game_id = w.game_id
         WHERE w.user_id = ?1
         ORDER BY w.created_at DESC",
        user_id,
      )
      .await?;

    rows
      .into_iter()
      .map(|(raw, at)| -> Result<WishedGame> {
        Ok(WishedGame {
          game:       raw.into_game()?,
          created_at: decode_dt(&at)?,
        })
      })
      .collect::<Result<Vec<_>>>()
      .map_err(CoreError::from)
  }

  // ── Reviews ───────────────────────────────────────────────────────────

  fn capabilities(&self) -> SchemaCapabilities { self.capabilities.clone() }

  async fn create_review(&self, input: NewReview) -> CoreResult<Review> {
    // Entitlement gate: a review requires a purchase record.
    if !self.has_purchased(input.user_id, input.game_id).await? {
      return Err(CoreError::NotPurchased {
        user_id: input.user_id,
        game_id: input.game_id,
      });
    }

    // Fast-path duplicate check; the UNIQUE constraint on the insert below
    // is the authoritative one.
    if self.has_review(input.user_id, input.game_id).await? {
      return Err(CoreError::DuplicateReview {
        user_id: input.user_id,
        game_id: input.game_id,
      });
    }

    // Keep only the attributes this deployment's schema can hold.
    let supported: Ratings = input
      .ratings
      .into_iter()
      .filter(|(attr, _)| self.capabilities.supports(*attr))
      .collect();

    let review = Review {
      review_id:    Uuid::new_v4(),
      user_id:      input.user_id,
      game_id:      input.game_id,
      comment:      input.comment,
      ratings:      supported,
      is_hidden:    false,
      report_count: 0,
      created_at:   Utc::now(),
    };

    match self.insert_review(&review).await {
      Ok(()) => Ok(review),
      Err(e) if e.is_unique_violation() => Err(CoreError::DuplicateReview {
        user_id: review.user_id,
        game_id: review.game_id,
      }),
      Err(e) => Err(e.into()),
    }
  }

  async fn has_review(&self, user_id: Uuid, game_id: Uuid) -> CoreResult<bool> {
    Ok(
      self
        .pair_exists(
          "SELECT 1 FROM reviews WHERE user_id = ?1 AND game_id = ?2",
          user_id,
          game_id,
        )
        .await?,
    )
  }

  async fn get_review(&self, review_id: Uuid) -> CoreResult<Option<Review>> {
    let mut raws = self
      .select_reviews("WHERE review_id = ?1", review_id)
      .await?;
    raws
      .pop()
      .map(|r| r.into_review().map_err(CoreError::from))
      .transpose()
  }

  async fn list_visible_reviews(&self, game_id: Uuid) -> CoreResult<Vec<Review>> {
    let raws = self
      .select_reviews(
        "WHERE game_id = ?1 AND is_hidden = 0 ORDER BY created_at DESC",
        game_id,
      )
      .await?;
    raws
      .into_iter()
      .map(|r| r.into_review().map_err(CoreError::from))
      .collect()
  }

  async fn list_user_reviews(&self, user_id: Uuid) -> CoreResult<Vec<Review>> {
    let raws = self
      .select_reviews(
        "WHERE user_id = ?1 ORDER BY created_at DESC",
        user_id,
      )
      .await?;
    raws
      .into_iter()
      .map(|r| r.into_review().map_err(CoreError::from))
      .collect()
  }

  async fn set_review_hidden(
    &self,
    review_id: Uuid,
    hidden: bool,
  ) -> CoreResult<()> {
    let id_str = encode_uuid(review_id);
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE reviews SET is_hidden = ?2 WHERE review_id = ?1",
          rusqlite::params![id_str, hidden as i64],
        )?)
      })
      .await
      .map_err(Error::from)?;

    if changed == 0 {
      return Err(CoreError::ReviewNotFound(review_id));
    }
    Ok(())
  }

  async fn delete_review(
    &self,
    review_id: Uuid,
    requester: Uuid,
  ) -> CoreResult<()> {
    let author_str = self
      .review_author(review_id)
      .await?
      .ok_or(CoreError::ReviewNotFound(review_id))?;
    let author = decode_uuid(&author_str).map_err(CoreError::from)?;
    if author != requester {
      return Err(CoreError::NotReviewAuthor(review_id));
    }

    let id_str = encode_uuid(review_id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM reviews WHERE review_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await
      .map_err(Error::from)?;
    Ok(())
  }

  // ── Report ledger ─────────────────────────────────────────────────────

  async fn file_report(&self, input: NewReport) -> CoreResult<Report> {
    if self.review_author(input.review_id).await?.is_none() {
      return Err(CoreError::ReviewNotFound(input.review_id));
    }

    let report = Report {
      report_id:   Uuid::new_v4(),
      review_id:   input.review_id,
      reporter_id: input.reporter_id,
      reason:      input.reason,
      detail:      input.detail,
      created_at:  Utc::now(),
    };

    // Primary effect. From here on the report is filed; nothing below may
    // undo it.
    self.insert_report(&report).await?;

    // Secondary effect: the running counter on the review row. Absent
    // column or failed update degrades to a log line.
    if self.capabilities.report_count {
      if let Err(e) = self.increment_report_count(report.review_id).await {
        tracing::warn!(
          review_id = %report.review_id,
          error = %e,
          "report filed but counter increment failed"
        );
      }
    } else {
      tracing::debug!(
        review_id = %report.review_id,
        "schema carries no report counter; increment skipped"
      );
    }

    Ok(report)
  }

  async fn list_reports(&self, review_id: Uuid) -> CoreResult<Vec<Report>> {
    let id_str = encode_uuid(review_id);
    let rows: Vec<(String, String, String, String, Option<String>, String)> =
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(
            "SELECT report_id, review_id, reporter_id, reason, detail,
                    created_at
             FROM reports
             WHERE review_id = ?1
             ORDER BY created_at ASC",
          )?;
          let rows = stmt
            .query_map(rusqlite::params![id_str], |row| {
              Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
              ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await
        .map_err(Error::from)?;

    rows
      .into_iter()
      .map(
        |(report_id, review_id, reporter_id, reason, detail, at)| -> Result<Report> {
          Ok(Report {
            report_id:   decode_uuid(&report_id)?,
            review_id:   decode_uuid(&review_id)?,
            reporter_id: decode_uuid(&reporter_id)?,
            reason,
            detail,
            created_at:  decode_dt(&at)?,
          })
        },
      )
      .collect::<Result<Vec<_>>>()
      .map_err(CoreError::from)
  }
}
