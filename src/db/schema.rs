//! Database schema

/// SQL schema for initialization
///
/// One row per hash field: `key` is the owning record (the stringified user
/// id), `field` and `value` are the hash entry.
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS hashes (
    key TEXT NOT NULL,
    field TEXT NOT NULL,
    value TEXT NOT NULL,

    PRIMARY KEY (key, field)
);

CREATE INDEX IF NOT EXISTS idx_hashes_key ON hashes(key);
";
