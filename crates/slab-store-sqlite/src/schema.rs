//! SQL schema for the slab SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    name          TEXT NOT NULL,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    created_at    TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at    TEXT
);

-- Cards are plain mutable documents; no soft-delete, no versioning.
CREATE TABLE IF NOT EXISTS cards (
    card_id         TEXT PRIMARY KEY,
    user_id         TEXT NOT NULL REFERENCES users(user_id),
    player          TEXT NOT NULL,
    year            INTEGER NOT NULL,
    sport           TEXT NOT NULL,
    manufacturer    TEXT NOT NULL,
    set_name        TEXT,
    card_number     TEXT,
    graded          TEXT NOT NULL DEFAULT 'No',   -- 'Yes' | 'No'
    grading_company TEXT,
    grade_number    INTEGER,
    notes           TEXT,
    image_url       TEXT,
    created_at      TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at      TEXT
);

CREATE INDEX IF NOT EXISTS cards_user_idx ON cards(user_id);

PRAGMA user_version = 1;
";
