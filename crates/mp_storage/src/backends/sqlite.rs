use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use mp_core::{Error, GeneratedArticle, HistoryStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;

use crate::HISTORY_KEY;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
];

/// History kept as one JSON value in a key/value table.
pub struct SQLiteHistoryStore {
    pool: Arc<SqlitePool>,
}

fn db_error(what: &str, e: sqlx::Error) -> Error {
    Error::Storage(format!("{}: {}", what, e))
}

impl SQLiteHistoryStore {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| db_error("Failed to connect to database", e))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| db_error(&format!("Failed to run migration {}", i), e))?;
        }

        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl HistoryStore for SQLiteHistoryStore {
    async fn load(&self) -> Result<Vec<GeneratedArticle>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(HISTORY_KEY)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| db_error("Failed to load history", e))?;

        Ok(match row {
            Some(row) => {
                let raw: String = row.try_get("value").map_err(|e| db_error("Failed to read history", e))?;
                crate::decode_history(&raw)
            }
            None => Vec::new(),
        })
    }

    async fn save(&self, articles: &[GeneratedArticle]) -> Result<()> {
        let raw = serde_json::to_string(articles)?;
        sqlx::query("INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)")
            .bind(HISTORY_KEY)
            .bind(raw)
            .execute(&*self.pool)
            .await
            .map_err(|e| db_error("Failed to save history", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("history.db");

        let store = SQLiteHistoryStore::new_with_path(&db_path).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());

        let articles = vec![GeneratedArticle::new("T", "C", vec![])];
        store.save(&articles).await.unwrap();
        store.save(&articles).await.unwrap();
        assert_eq!(store.load().await.unwrap(), articles);
    }
}
