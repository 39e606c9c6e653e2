//! SQL schema for the profile store.
//!
//! Executed once at connection startup. There are no migrations; the DDL is
//! idempotent thanks to `CREATE TABLE IF NOT EXISTS`.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per profile. `document` holds the full JSON body; the scalar
-- columns mirror it so the index and CHECK can see them.
CREATE TABLE IF NOT EXISTS profiles (
    profile_id  TEXT PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    is_company  INTEGER NOT NULL DEFAULT 0,
    is_verified INTEGER NOT NULL DEFAULT 0,
    document    TEXT NOT NULL,
    CHECK (is_verified = 0 OR is_company = 1)
);

PRAGMA user_version = 1;
";
