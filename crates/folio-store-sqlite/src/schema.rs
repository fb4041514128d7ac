//! SQL schema for the Folio SQLite store.
//!
//! Executed on every connection open; every statement is idempotent.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id           TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    email        TEXT NOT NULL,
    company      TEXT NOT NULL DEFAULT '',
    message      TEXT NOT NULL,
    subject      TEXT NOT NULL DEFAULT '',
    status       TEXT NOT NULL DEFAULT 'new',  -- new | read | processed | replied | archived
    source       TEXT NOT NULL DEFAULT 'website',
    created_at   TEXT NOT NULL,                -- submission time, fixed-width RFC 3339
    updated_at   TEXT NOT NULL,
    processed_at TEXT
);

CREATE TABLE IF NOT EXISTS technologies (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    category    TEXT NOT NULL,
    icon_url    TEXT,
    level       TEXT NOT NULL,
    description TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Nested collections are stored as JSON arrays.
CREATE TABLE IF NOT EXISTS experiences (
    id           TEXT PRIMARY KEY,
    company_name TEXT NOT NULL,
    position     TEXT NOT NULL,
    description  TEXT NOT NULL DEFAULT '',
    location     TEXT NOT NULL DEFAULT '',
    start_date   TEXT NOT NULL,
    end_date     TEXT,
    is_remote    INTEGER NOT NULL DEFAULT 0,
    technologies TEXT NOT NULL DEFAULT '[]',
    achievements TEXT NOT NULL DEFAULT '[]',
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS services (
    id           TEXT PRIMARY KEY,
    name         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    description  TEXT NOT NULL,
    category     TEXT NOT NULL,
    duration     TEXT,
    pricing      TEXT,             -- JSON PricingInfo or NULL
    technologies TEXT NOT NULL DEFAULT '[]',
    deliverables TEXT NOT NULL DEFAULT '[]',
    is_active    INTEGER NOT NULL DEFAULT 1,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_status_idx  ON contacts(status);
CREATE INDEX IF NOT EXISTS contacts_created_idx ON contacts(created_at);
CREATE INDEX IF NOT EXISTS technologies_category_idx ON technologies(category);

PRAGMA user_version = 1;
";
