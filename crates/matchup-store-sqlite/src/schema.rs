//! SQL schema for the matchup SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;

CREATE TABLE IF NOT EXISTS items (
    item_id    TEXT PRIMARY KEY,
    title      TEXT,
    image_url  TEXT,
    added_at   TEXT NOT NULL      -- RFC 3339 UTC, fixed microsecond width
);

-- One row per voting week. Never deleted.
CREATE TABLE IF NOT EXISTS matchups (
    matchup_id    TEXT PRIMARY KEY,
    week_start    TEXT NOT NULL UNIQUE,   -- YYYY-MM-DD
    option_a_ref  TEXT,
    option_b_ref  TEXT,
    status        TEXT NOT NULL DEFAULT 'pending'
                  CHECK (status IN ('pending', 'active', 'closed')),
    created_at    TEXT NOT NULL,
    CHECK (status = 'pending'
           OR (option_a_ref IS NOT NULL AND option_b_ref IS NOT NULL))
);

-- At most one active matchup at a time.
CREATE UNIQUE INDEX IF NOT EXISTS matchups_single_active_idx
    ON matchups(status) WHERE status = 'active';

-- Votes are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS votes (
    week_start         TEXT NOT NULL REFERENCES matchups(week_start),
    choice             TEXT NOT NULL CHECK (choice IN ('a', 'b')),
    voter_fingerprint  TEXT NOT NULL,
    cast_at            TEXT NOT NULL,
    UNIQUE (week_start, voter_fingerprint)
);

CREATE INDEX IF NOT EXISTS items_added_idx ON items(added_at);

PRAGMA user_version = 1;
";
