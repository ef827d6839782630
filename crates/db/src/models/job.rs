use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

const SELECT_COLUMNS: &str = "id, title, slug, department, location, employment_type, responsibilities, requirements, nice_to_have, is_open, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub responsibilities: String, // JSON array of strings
    pub requirements: String,     // JSON array of strings
    pub nice_to_have: String,     // JSON array of strings
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn parsed_responsibilities(&self) -> Vec<String> {
        from_json_or_default(&self.responsibilities)
    }

    pub fn parsed_requirements(&self) -> Vec<String> {
        from_json_or_default(&self.requirements)
    }

    pub fn parsed_nice_to_have(&self) -> Vec<String> {
        from_json_or_default(&self.nice_to_have)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateJob {
    pub title: String,
    pub slug: Option<String>,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub nice_to_have: Vec<String>,
    #[serde(default = "default_open")]
    pub is_open: bool,
}

fn default_open() -> bool {
    true
}

impl CreateJob {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("department", &self.department)?;
        require_non_empty("location", &self.location)?;
        if let Some(slug) = &self.slug {
            require_valid_slug(slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateJob {
    pub title: String,
    pub slug: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub nice_to_have: Vec<String>,
    pub is_open: bool,
}

impl UpdateJob {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("department", &self.department)?;
        require_non_empty("location", &self.location)?;
        require_valid_slug(&self.slug)
    }
}

impl Job {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_open(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM jobs WHERE is_open = 1 ORDER BY department ASC, title ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {SELECT_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM jobs WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateJob) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&data.title));
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO jobs (id, title, slug, department, location, employment_type, responsibilities, requirements, nice_to_have, is_open)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&slug)
        .bind(&data.department)
        .bind(&data.location)
        .bind(&data.employment_type)
        .bind(to_json(&data.responsibilities)?)
        .bind(to_json(&data.requirements)?)
        .bind(to_json(&data.nice_to_have)?)
        .bind(data.is_open)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateJob,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE jobs
               SET title = $2, slug = $3, department = $4, location = $5, employment_type = $6,
                   responsibilities = $7, requirements = $8, nice_to_have = $9, is_open = $10,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.department)
        .bind(&data.location)
        .bind(&data.employment_type)
        .bind(to_json(&data.responsibilities)?)
        .bind(to_json(&data.requirements)?)
        .bind(to_json(&data.nice_to_have)?)
        .bind(data.is_open)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
