//! SQLite schema for the persistent cache layer.

/// Key/value table shared with other local state; cache rows are prefixed.
pub const CREATE_KV_STORE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)
"#;

pub const SELECT_VALUE: &str = "SELECT value FROM kv_store WHERE key = ?1";

pub const UPSERT_VALUE: &str = r#"
INSERT INTO kv_store (key, value) VALUES (?1, ?2)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#;

pub const DELETE_KEY: &str = "DELETE FROM kv_store WHERE key = ?1";

pub const SELECT_KEYS: &str = "SELECT key FROM kv_store";
