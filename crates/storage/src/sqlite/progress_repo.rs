use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use vanguard_core::model::UserProgress;

use crate::record::{self, DecodedUser};
use crate::repository::{ProgressRepository, StorageError, USER_RECORD_KEY};

use super::SqliteRepository;

impl SqliteRepository {
    /// Raw stored text for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query failures.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|err| StorageError::Serialization(err.to_string()))
        })
        .transpose()
    }

    /// Insert or replace the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query failures.
    pub async fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_user(&self) -> Result<Option<DecodedUser>, StorageError> {
        Ok(self
            .get_raw(USER_RECORD_KEY)
            .await?
            .map(|text| record::decode_user(&text)))
    }

    async fn save_user(&self, user: &UserProgress) -> Result<(), StorageError> {
        let text = record::encode_user(user)?;
        self.put_raw(USER_RECORD_KEY, &text).await
    }
}
