use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::ValidationError;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[sqlx(type_name = "setting_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SettingKind {
    #[default]
    String,
    Json,
}

const SELECT_COLUMNS: &str = "id, key, value, kind, created_at, updated_at";

/// Generic key/value store for homepage hero copy, process steps and the
/// like. JSON-kinded values are validated before write.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Setting {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub kind: SettingKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpsertSetting {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub kind: SettingKind,
}

impl UpsertSetting {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.trim().is_empty() {
            return Err(ValidationError::new("key must not be empty"));
        }
        if self.kind == SettingKind::Json
            && serde_json::from_str::<serde_json::Value>(&self.value).is_err()
        {
            return Err(ValidationError::new(format!(
                "value for {:?} is not valid JSON",
                self.key
            )));
        }
        Ok(())
    }
}

impl Setting {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM settings ORDER BY key ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_key(pool: &SqlitePool, key: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM settings WHERE key = $1"
        ))
        .bind(key)
        .fetch_optional(pool)
        .await
    }

    pub async fn upsert(pool: &SqlitePool, data: &UpsertSetting) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO settings (id, key, value, kind)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (key) DO UPDATE
               SET value = excluded.value, kind = excluded.kind,
                   updated_at = datetime('now', 'subsec')
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.key)
        .bind(&data.value)
        .bind(&data.kind)
        .fetch_one(pool)
        .await
    }

    pub async fn delete_by_key(pool: &SqlitePool, key: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
