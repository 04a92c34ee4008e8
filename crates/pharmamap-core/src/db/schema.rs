//! SQLite schema definition.

/// Complete database schema for the local cache.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Session Cache (single row, overwritten on every sign-in)
-- ============================================================================

CREATE TABLE IF NOT EXISTS session_cache (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    user_json TEXT NOT NULL,                     -- JSON CurrentUser
    cached_at TEXT NOT NULL                      -- RFC 3339
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_single_row_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO session_cache (id, user_json, cached_at) VALUES (2, '{}', '')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO session_cache (id, user_json, cached_at) VALUES (1, '{}', '')",
            [],
        );
        assert!(result.is_ok());
    }
}
