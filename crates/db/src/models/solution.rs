use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[sqlx(type_name = "solution_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SolutionKind {
    #[default]
    Product,
    Kit,
    Lab,
}

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[sqlx(type_name = "solution_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SolutionStatus {
    Live,
    Beta,
    #[default]
    ComingSoon,
}

const SELECT_COLUMNS: &str = "id, name, slug, description, kind, status, who_its_for, features, architecture, engagement_options, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Solution {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub kind: SolutionKind,
    pub status: SolutionStatus,
    pub who_its_for: String,        // JSON array of strings
    pub features: String,           // JSON array of strings
    pub architecture: String,       // JSON array of strings
    pub engagement_options: String, // JSON array of strings
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Solution {
    pub fn parsed_who_its_for(&self) -> Vec<String> {
        from_json_or_default(&self.who_its_for)
    }

    pub fn parsed_features(&self) -> Vec<String> {
        from_json_or_default(&self.features)
    }

    pub fn parsed_architecture(&self) -> Vec<String> {
        from_json_or_default(&self.architecture)
    }

    pub fn parsed_engagement_options(&self) -> Vec<String> {
        from_json_or_default(&self.engagement_options)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateSolution {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    #[serde(default)]
    pub kind: SolutionKind,
    #[serde(default)]
    pub status: SolutionStatus,
    #[serde(default)]
    pub who_its_for: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub architecture: Vec<String>,
    #[serde(default)]
    pub engagement_options: Vec<String>,
}

impl CreateSolution {
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
pub struct UpdateSolution {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub kind: SolutionKind,
    pub status: SolutionStatus,
    #[serde(default)]
    pub who_its_for: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub architecture: Vec<String>,
    #[serde(default)]
    pub engagement_options: Vec<String>,
}

impl UpdateSolution {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("description", &self.description)?;
        require_valid_slug(&self.slug)
    }
}

impl Solution {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM solutions ORDER BY name ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_status(
        pool: &SqlitePool,
        status: SolutionStatus,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM solutions WHERE status = $1 ORDER BY name ASC"
        ))
        .bind(status)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM solutions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM solutions WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateSolution) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&data.name));
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO solutions (id, name, slug, description, kind, status, who_its_for, features, architecture, engagement_options)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&slug)
        .bind(&data.description)
        .bind(&data.kind)
        .bind(&data.status)
        .bind(to_json(&data.who_its_for)?)
        .bind(to_json(&data.features)?)
        .bind(to_json(&data.architecture)?)
        .bind(to_json(&data.engagement_options)?)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateSolution,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE solutions
               SET name = $2, slug = $3, description = $4, kind = $5, status = $6,
                   who_its_for = $7, features = $8, architecture = $9, engagement_options = $10,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.kind)
        .bind(&data.status)
        .bind(to_json(&data.who_its_for)?)
        .bind(to_json(&data.features)?)
        .bind(to_json(&data.architecture)?)
        .bind(to_json(&data.engagement_options)?)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM solutions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
