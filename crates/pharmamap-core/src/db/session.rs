//! Session cache operations.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::CurrentUser;

/// The cached identity and when it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedUser {
    pub user: CurrentUser,
    pub cached_at: DateTime<Utc>,
}

impl Database {
    /// Store the signed-in user, replacing any previous one.
    pub fn save_session_user(&self, user: &CurrentUser) -> DbResult<DateTime<Utc>> {
        let user_json = serde_json::to_string(user)?;
        let cached_at = Utc::now();

        self.conn.execute(
            r#"
            INSERT INTO session_cache (id, user_json, cached_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                user_json = excluded.user_json,
                cached_at = excluded.cached_at
            "#,
            params![user_json, cached_at.to_rfc3339()],
        )?;
        Ok(cached_at)
    }

    /// Load the cached user, if any.
    pub fn load_session_user(&self) -> DbResult<Option<CachedUser>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT user_json, cached_at FROM session_cache WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(user_json, cached_at)| -> DbResult<CachedUser> {
            Ok(CachedUser {
                user: serde_json::from_str(&user_json)?,
                cached_at: DateTime::parse_from_rfc3339(&cached_at)?.with_timezone(&Utc),
            })
        })
        .transpose()
    }

    /// Remove the cached user. Returns whether one was present.
    pub fn clear_session_user(&self) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM session_cache WHERE id = 1", [])?;
        Ok(rows_affected > 0)
    }
}
