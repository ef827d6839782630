use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, require_non_empty};

const SELECT_COLUMNS: &str =
    "id, year, title, description, tag, position, created_at, updated_at";

/// One entry on the company journey timeline. Plain ordered list, no
/// sub-documents.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub year: i64,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateTimelineEvent {
    pub year: i64,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    /// Appended after the current last position when absent.
    pub position: Option<i64>,
}

impl CreateTimelineEvent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("description", &self.description)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateTimelineEvent {
    pub year: i64,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub position: i64,
}

impl UpdateTimelineEvent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("description", &self.description)
    }
}

impl TimelineEvent {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM timeline_events ORDER BY position ASC, year ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM timeline_events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateTimelineEvent,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let position = match data.position {
            Some(p) => p,
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COALESCE(MAX(position), 0) + 1 FROM timeline_events",
                )
                .fetch_one(pool)
                .await?
            }
        };
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO timeline_events (id, year, title, description, tag, position)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.year)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.tag)
        .bind(position)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateTimelineEvent,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE timeline_events
               SET year = $2, title = $3, description = $4, tag = $5, position = $6,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.year)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.tag)
        .bind(data.position)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timeline_events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
