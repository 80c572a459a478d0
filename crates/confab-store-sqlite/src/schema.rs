//! SQL schema for the Confab SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `foreign_keys` must be switched on explicitly — SQLite defaults it off,
/// and the draft cleanse relies on the cascades below.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- AUTOINCREMENT keeps ids monotonic: a cleansed draft's id is never handed
-- out again, so interaction ordering stays stable across restarts.
CREATE TABLE IF NOT EXISTS sessions (
    session_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    name_custom TEXT,
    persisted   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS session_descriptions (
    session_id  INTEGER NOT NULL UNIQUE
                REFERENCES sessions(session_id) ON DELETE CASCADE,
    description TEXT NOT NULL
);

-- Append-only except for the amend-tail operation, which rewrites the
-- max-id row in place.
CREATE TABLE IF NOT EXISTS interactions (
    interaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id     INTEGER NOT NULL
                   REFERENCES sessions(session_id) ON DELETE CASCADE,
    user_input     TEXT NOT NULL,
    llm_output     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS summaries (
    session_id   INTEGER NOT NULL UNIQUE
                 REFERENCES sessions(session_id) ON DELETE CASCADE,
    summary      TEXT NOT NULL,
    n_summarized INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS interactions_session_idx ON interactions(session_id);

PRAGMA user_version = 1;
";
