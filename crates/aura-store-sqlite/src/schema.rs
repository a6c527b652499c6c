//! SQL schema for the session store.

/// Idempotent DDL, run on every open.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- At most one row per actor, keyed by the actor's credential key.
CREATE TABLE IF NOT EXISTS sessions (
    actor       TEXT PRIMARY KEY,   -- 'aura_access_token' | 'aura_company_access_token'
    token       TEXT NOT NULL,
    updated_at  TEXT NOT NULL       -- RFC 3339 UTC
);

PRAGMA user_version = 1;
";
