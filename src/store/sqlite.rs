use spin_sdk::sqlite::{Connection, QueryResult, Value};

use super::{LikeStore, StoreError};
use crate::core::helpers::now_iso;
use crate::models::PostRecord;

const INCREMENT_SQL: &str = "UPDATE posts \
     SET likes_count = likes_count + 1, updated_at = ? \
     WHERE id = ? \
     RETURNING id, likes_count, created_at, updated_at";

const SELECT_ONE_SQL: &str =
    "SELECT id, likes_count, created_at, updated_at FROM posts WHERE id = ?";

const SELECT_ALL_SQL: &str =
    "SELECT id, likes_count, created_at, updated_at FROM posts ORDER BY created_at DESC, id ASC";

/// Spin SQLite database holding the `posts` table from `migrations.sql`.
///
/// The increment is one `UPDATE ... RETURNING` statement, so the database
/// serializes concurrent likes of the same row.
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    pub fn open(label: &str) -> Result<Self, StoreError> {
        let connection =
            Connection::open(label).map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { connection })
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<PostRecord>, StoreError> {
        let result = self
            .connection
            .execute(sql, params)
            .map_err(|e| StoreError::Query(e.to_string()))?;
        rows_to_posts(&result)
    }
}

fn rows_to_posts(result: &QueryResult) -> Result<Vec<PostRecord>, StoreError> {
    result
        .rows()
        .map(|row| -> Result<PostRecord, StoreError> {
            let id = row
                .get::<&str>("id")
                .ok_or_else(|| StoreError::Corrupt("missing id".to_string()))?;
            let likes_count = row
                .get::<i64>("likes_count")
                .ok_or_else(|| StoreError::Corrupt(format!("missing likes_count for {id}")))?;
            Ok(PostRecord {
                id: id.to_string(),
                likes_count,
                created_at: row.get::<&str>("created_at").unwrap_or_default().to_string(),
                updated_at: row.get::<&str>("updated_at").map(str::to_string),
            })
        })
        .collect()
}

impl LikeStore for SqliteStore {
    fn increment_likes(&self, post_id: &str) -> Result<Vec<PostRecord>, StoreError> {
        self.query(
            INCREMENT_SQL,
            &[Value::Text(now_iso()), Value::Text(post_id.to_string())],
        )
    }

    fn get_post(&self, post_id: &str) -> Result<Option<PostRecord>, StoreError> {
        Ok(self
            .query(SELECT_ONE_SQL, &[Value::Text(post_id.to_string())])?
            .into_iter()
            .next())
    }

    fn list_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        self.query(SELECT_ALL_SQL, &[])
    }
}
