//! SQLite-backed document collection.
//!
//! All collections share one `documents` table keyed by
//! `(collection, key)`; documents are stored as JSON text.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use stockroom_core::Document;

use super::{CollectionError, DocumentCollection};

/// SQLite document collection.
#[derive(Debug, Clone)]
pub struct SqliteCollection {
    /// `SqlitePool` is `Send + Sync` and cheap to clone.
    pool: SqlitePool,
}

impl SqliteCollection {
    /// Connect to `url` (e.g. `sqlite:///var/lib/stockroom/inventory.db`),
    /// creating the database file and schema if needed.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid SQLite URL {url:?}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open SQLite database at {url:?}"))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection  TEXT NOT NULL,
                key         TEXT NOT NULL,
                data        TEXT NOT NULL,
                updated_at  TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create documents table")?;

        Ok(Self { pool })
    }

    /// Open (or create) a database file at `path`.
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        Self::connect(&format!("sqlite://{}", path.to_string_lossy())).await
    }

    async fn fetch_all(&self, collection: &str) -> anyhow::Result<Vec<(String, String)>> {
        let rows = sqlx::query(
            r#"
            SELECT key, data
            FROM documents
            WHERE collection = ?1
            ORDER BY key
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .context("failed to list documents")?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let key: String = row.try_get("key")?;
            let data: String = row.try_get("data")?;
            docs.push((key, data));
        }
        Ok(docs)
    }

    async fn fetch_one(&self, collection: &str, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT data
            FROM documents
            WHERE collection = ?1
              AND key = ?2
            "#,
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch document")?;

        match row {
            Some(row) => Ok(Some(row.try_get("data")?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, collection: &str, key: &str, payload: &str) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, data, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(collection, key)
            DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(payload)
        .bind(&now)
        .execute(&self.pool)
        .await
        .context("failed to upsert document")?;

        Ok(())
    }

    async fn remove(&self, collection: &str, key: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = ?1
              AND key = ?2
            "#,
        )
        .bind(collection)
        .bind(key)
        .execute(&self.pool)
        .await
        .context("failed to delete document")?;

        Ok(())
    }
}

fn unavailable(err: anyhow::Error) -> CollectionError {
    CollectionError::Unavailable(format!("{err:#}"))
}

fn decode(key: &str, data: &str) -> Result<Document, CollectionError> {
    serde_json::from_str(data).map_err(|e| CollectionError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[async_trait::async_trait]
impl DocumentCollection for SqliteCollection {
    async fn list_all(&self, collection: &str) -> Result<Vec<(String, Document)>, CollectionError> {
        let rows = self.fetch_all(collection).await.map_err(unavailable)?;
        let mut docs = Vec::with_capacity(rows.len());
        for (key, data) in rows {
            let doc = decode(&key, &data)?;
            docs.push((key, doc));
        }
        Ok(docs)
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, CollectionError> {
        match self.fetch_one(collection, key).await.map_err(unavailable)? {
            Some(data) => decode(key, &data).map(Some),
            None => Ok(None),
        }
    }

    async fn put(&self, collection: &str, key: &str, doc: Document) -> Result<(), CollectionError> {
        let payload = serde_json::to_string(&doc).map_err(|e| CollectionError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.upsert(collection, key, &payload)
            .await
            .map_err(unavailable)
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), CollectionError> {
        self.remove(collection, key).await.map_err(unavailable)
    }
}
