use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{PersonRecord, RecordId};

/// Persistence seam for the record collection.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn list_records(&self) -> Result<Vec<PersonRecord>>;
    async fn get_record(&self, id: &RecordId) -> Result<Option<PersonRecord>>;
    /// Returns `false` when a record with the same id already exists.
    async fn insert_record(&self, record: &PersonRecord) -> Result<bool>;
    /// Full replace. Returns `false` when no record has this id.
    async fn replace_record(&self, id: &RecordId, record: &PersonRecord) -> Result<bool>;
    async fn delete_record(&self, id: &RecordId) -> Result<bool>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        let storage = Self { pool };
        storage.ensure_records_table().await?;
        Ok(storage)
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_records_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                position   INTEGER PRIMARY KEY AUTOINCREMENT,
                id         TEXT NOT NULL UNIQUE,
                body       TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create records table")?;
        Ok(())
    }
}

fn encode_body(record: &PersonRecord) -> Result<String> {
    serde_json::to_string(record).context("failed to encode record body")
}

fn decode_body(id: &str, body: &str) -> Result<PersonRecord> {
    serde_json::from_str(body).with_context(|| format!("stored record {id} has a corrupt body"))
}

#[async_trait]
impl RecordRepository for Storage {
    async fn list_records(&self) -> Result<Vec<PersonRecord>> {
        let rows = sqlx::query("SELECT id, body FROM records ORDER BY position ASC")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| {
                let id: String = row.get(0);
                let body: String = row.get(1);
                decode_body(&id, &body)
            })
            .collect()
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<PersonRecord>> {
        let row = sqlx::query("SELECT body FROM records WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| decode_body(id.as_str(), &r.get::<String, _>(0)))
            .transpose()
    }

    async fn insert_record(&self, record: &PersonRecord) -> Result<bool> {
        let body = encode_body(record)?;
        let inserted = sqlx::query(
            "INSERT INTO records (id, body) VALUES (?, ?)
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(record.id.as_str())
        .bind(body)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(inserted > 0)
    }

    async fn replace_record(&self, id: &RecordId, record: &PersonRecord) -> Result<bool> {
        let body = encode_body(record)?;
        let updated = sqlx::query(
            "UPDATE records SET body = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(body)
        .bind(id.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(updated > 0)
    }

    async fn delete_record(&self, id: &RecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
