use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

/// A headline metric shown on a case-study card, e.g. `{"-40%", "infra cost"}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
pub struct ResultMetric {
    pub metric: String,
    pub label: String,
}

const SELECT_COLUMNS: &str = "id, title, slug, client, industry, problem, result, results, tech_stack, tags, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct CaseStudy {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub client: String,
    pub industry: String,
    pub problem: String,
    pub result: String,
    pub results: String,    // JSON array of ResultMetric
    pub tech_stack: String, // JSON array of strings
    pub tags: String,       // JSON array of strings
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseStudy {
    pub fn parsed_results(&self) -> Vec<ResultMetric> {
        from_json_or_default(&self.results)
    }

    pub fn parsed_tech_stack(&self) -> Vec<String> {
        from_json_or_default(&self.tech_stack)
    }

    pub fn parsed_tags(&self) -> Vec<String> {
        from_json_or_default(&self.tags)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateCaseStudy {
    pub title: String,
    pub slug: Option<String>,
    pub client: String,
    pub industry: String,
    pub problem: String,
    pub result: String,
    #[serde(default)]
    pub results: Vec<ResultMetric>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateCaseStudy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("client", &self.client)?;
        require_non_empty("industry", &self.industry)?;
        if let Some(slug) = &self.slug {
            require_valid_slug(slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateCaseStudy {
    pub title: String,
    pub slug: String,
    pub client: String,
    pub industry: String,
    pub problem: String,
    pub result: String,
    #[serde(default)]
    pub results: Vec<ResultMetric>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UpdateCaseStudy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("client", &self.client)?;
        require_non_empty("industry", &self.industry)?;
        require_valid_slug(&self.slug)
    }
}

impl CaseStudy {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM case_studies ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_industry(
        pool: &SqlitePool,
        industry: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM case_studies WHERE industry = $1 ORDER BY created_at DESC"
        ))
        .bind(industry)
        .fetch_all(pool)
        .await
    }

    /// Distinct industries, for the public filter chips.
    pub async fn industries(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT industry FROM case_studies ORDER BY industry ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM case_studies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM case_studies WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateCaseStudy) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&data.title));
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO case_studies (id, title, slug, client, industry, problem, result, results, tech_stack, tags)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&slug)
        .bind(&data.client)
        .bind(&data.industry)
        .bind(&data.problem)
        .bind(&data.result)
        .bind(to_json(&data.results)?)
        .bind(to_json(&data.tech_stack)?)
        .bind(to_json(&data.tags)?)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateCaseStudy,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE case_studies
               SET title = $2, slug = $3, client = $4, industry = $5, problem = $6, result = $7,
                   results = $8, tech_stack = $9, tags = $10,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.client)
        .bind(&data.industry)
        .bind(&data.problem)
        .bind(&data.result)
        .bind(to_json(&data.results)?)
        .bind(to_json(&data.tech_stack)?)
        .bind(to_json(&data.tags)?)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM case_studies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
