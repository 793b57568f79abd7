//! SQL schema for the Arcadia SQLite store.
//!
//! Executed once at connection startup. `CREATE TABLE IF NOT EXISTS` leaves
//! pre-existing relations untouched, so a deployment whose `reviews` table
//! was migrated with a different subset of rating columns keeps its shape —
//! the capability prober picks up whatever is actually there.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,    -- argon2 PHC string
    role          TEXT NOT NULL DEFAULT 'user',  -- 'user' | 'admin'
    created_at    TEXT NOT NULL     -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS games (
    game_id      TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    description  TEXT,
    price        INTEGER NOT NULL DEFAULT 0,  -- minor units
    image_url    TEXT,
    developer    TEXT,
    release_date TEXT,              -- ISO 8601 date or NULL
    created_at   TEXT NOT NULL
);

-- Membership sets. The composite primary key is the authoritative
-- uniqueness guarantee; concurrent identical inserts resolve to a single
-- row via INSERT OR IGNORE.
CREATE TABLE IF NOT EXISTS purchases (
    user_id      TEXT NOT NULL REFERENCES users(user_id),
    game_id      TEXT NOT NULL REFERENCES games(game_id),
    purchased_at TEXT NOT NULL,
    PRIMARY KEY (user_id, game_id)
);

CREATE TABLE IF NOT EXISTS wishes (
    user_id    TEXT NOT NULL REFERENCES users(user_id),
    game_id    TEXT NOT NULL REFERENCES games(game_id),
    created_at TEXT NOT NULL,
    PRIMARY KEY (user_id, game_id)
);

-- One review per (user, game), enforced at the storage level.
-- Rating columns are the optional part of the schema; deployments may
-- carry any subset of them.
CREATE TABLE IF NOT EXISTS reviews (
    review_id               TEXT PRIMARY KEY,
    user_id                 TEXT NOT NULL REFERENCES users(user_id),
    game_id                 TEXT NOT NULL REFERENCES games(game_id),
    comment                 TEXT NOT NULL,
    rating_graphic          INTEGER,
    rating_quality          INTEGER,
    rating_fun              INTEGER,
    rating_replay           INTEGER,
    rating_price            INTEGER,
    rating_first_impression INTEGER,
    rating_access           INTEGER,
    rating_competitive      INTEGER,
    is_hidden               INTEGER NOT NULL DEFAULT 0,
    report_count            INTEGER NOT NULL DEFAULT 0,
    created_at              TEXT NOT NULL,
    UNIQUE (user_id, game_id)
);

-- Append-only report ledger. No UPDATE or DELETE is ever issued against
-- this table, and there is deliberately no foreign key to reviews: the
-- ledger outlives a review its author deleted.
CREATE TABLE IF NOT EXISTS reports (
    report_id   TEXT PRIMARY KEY,
    review_id   TEXT NOT NULL,
    reporter_id TEXT NOT NULL,
    reason      TEXT NOT NULL,
    detail      TEXT,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS reviews_game_idx   ON reviews(game_id);
CREATE INDEX IF NOT EXISTS reviews_user_idx   ON reviews(user_id);
CREATE INDEX IF NOT EXISTS reports_review_idx ON reports(review_id);

PRAGMA user_version = 1;
";
