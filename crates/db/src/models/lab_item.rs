use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[sqlx(type_name = "lab_stage", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LabStage {
    #[default]
    Exploring,
    Prototype,
    Incubating,
    Graduated,
}

const SELECT_COLUMNS: &str = "id, name, slug, description, stage, tags, created_at, updated_at";

/// An experiment on the labs page.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct LabItem {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub stage: LabStage,
    pub tags: String, // JSON array of strings
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LabItem {
    pub fn parsed_tags(&self) -> Vec<String> {
        from_json_or_default(&self.tags)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateLabItem {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    #[serde(default)]
    pub stage: LabStage,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateLabItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("description", &self.description)?;
        if let Some(slug) = &self.slug {
            require_valid_slug(slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateLabItem {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub stage: LabStage,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UpdateLabItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("description", &self.description)?;
        require_valid_slug(&self.slug)
    }
}

impl LabItem {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM lab_items ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM lab_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM lab_items WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateLabItem) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&data.name));
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO lab_items (id, name, slug, description, stage, tags)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&slug)
        .bind(&data.description)
        .bind(&data.stage)
        .bind(to_json(&data.tags)?)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateLabItem,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE lab_items
               SET name = $2, slug = $3, description = $4, stage = $5, tags = $6,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.stage)
        .bind(to_json(&data.tags)?)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lab_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
