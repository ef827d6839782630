use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

/// One engagement package offered under a service.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
pub struct PackageOffering {
    pub name: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

const SELECT_COLUMNS: &str = "id, name, slug, description, category, outcomes, packages, related_services, faqs, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub outcomes: String,         // JSON array of strings
    pub packages: String,         // JSON array of PackageOffering
    pub related_services: String, // JSON array of slugs
    pub faqs: String,             // JSON array of Faq
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn parsed_outcomes(&self) -> Vec<String> {
        from_json_or_default(&self.outcomes)
    }

    pub fn parsed_packages(&self) -> Vec<PackageOffering> {
        from_json_or_default(&self.packages)
    }

    pub fn parsed_related_services(&self) -> Vec<String> {
        from_json_or_default(&self.related_services)
    }

    pub fn parsed_faqs(&self) -> Vec<Faq> {
        from_json_or_default(&self.faqs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateService {
    pub name: String,
    /// Derived from `name` when absent.
    pub slug: Option<String>,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub packages: Vec<PackageOffering>,
    #[serde(default)]
    pub related_services: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

impl CreateService {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("description", &self.description)?;
        require_non_empty("category", &self.category)?;
        if let Some(slug) = &self.slug {
            require_valid_slug(slug)?;
        }
        Ok(())
    }

    pub fn slug_or_derived(&self) -> String {
        self.slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&self.name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateService {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub packages: Vec<PackageOffering>,
    #[serde(default)]
    pub related_services: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

impl UpdateService {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("description", &self.description)?;
        require_non_empty("category", &self.category)?;
        require_valid_slug(&self.slug)
    }
}

impl Service {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM services ORDER BY name ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_category(
        pool: &SqlitePool,
        category: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM services WHERE category = $1 ORDER BY name ASC"
        ))
        .bind(category)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM services WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateService) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data.slug_or_derived();
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO services (id, name, slug, description, category, outcomes, packages, related_services, faqs)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&slug)
        .bind(&data.description)
        .bind(&data.category)
        .bind(to_json(&data.outcomes)?)
        .bind(to_json(&data.packages)?)
        .bind(to_json(&data.related_services)?)
        .bind(to_json(&data.faqs)?)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateService,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE services
               SET name = $2, slug = $3, description = $4, category = $5,
                   outcomes = $6, packages = $7, related_services = $8, faqs = $9,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.category)
        .bind(to_json(&data.outcomes)?)
        .bind(to_json(&data.packages)?)
        .bind(to_json(&data.related_services)?)
        .bind(to_json(&data.faqs)?)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
