use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[sqlx(type_name = "product_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductCategory {
    #[default]
    Saas,
    Mobile,
    Script,
    Plugin,
    Template,
}

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[sqlx(type_name = "product_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Live,
    Deprecated,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
pub struct PricingTier {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Pricing block rendered on the product page.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
pub struct Pricing {
    /// Free-text model label ("one-time", "subscription", ...).
    pub model: String,
    #[serde(default)]
    pub tiers: Vec<PricingTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub changes: Vec<String>,
}

const SELECT_COLUMNS: &str = "id, name, slug, tagline, description, category, status, is_featured, source_url, demo_url, tech_stack, screenshots, features, pricing, changelog, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: String,
    pub category: ProductCategory,
    pub status: ProductStatus,
    pub is_featured: bool,
    pub source_url: Option<String>,
    pub demo_url: Option<String>,
    pub tech_stack: String,      // JSON array of strings
    pub screenshots: String,     // JSON array of URLs
    pub features: String,        // JSON array of strings
    pub pricing: Option<String>, // JSON Pricing object
    pub changelog: String,       // JSON array of ChangelogEntry
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn parsed_tech_stack(&self) -> Vec<String> {
        from_json_or_default(&self.tech_stack)
    }

    pub fn parsed_screenshots(&self) -> Vec<String> {
        from_json_or_default(&self.screenshots)
    }

    pub fn parsed_features(&self) -> Vec<String> {
        from_json_or_default(&self.features)
    }

    pub fn parsed_pricing(&self) -> Option<Pricing> {
        self.pricing
            .as_ref()
            .and_then(|json| serde_json::from_str(json).ok())
    }

    pub fn parsed_changelog(&self) -> Vec<ChangelogEntry> {
        from_json_or_default(&self.changelog)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateProduct {
    pub name: String,
    pub slug: Option<String>,
    pub tagline: Option<String>,
    pub description: String,
    #[serde(default)]
    pub category: ProductCategory,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub is_featured: bool,
    pub source_url: Option<String>,
    pub demo_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

impl CreateProduct {
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
pub struct UpdateProduct {
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: String,
    pub category: ProductCategory,
    pub status: ProductStatus,
    pub is_featured: bool,
    pub source_url: Option<String>,
    pub demo_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("description", &self.description)?;
        require_valid_slug(&self.slug)
    }
}

impl Product {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY name ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_featured(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE is_featured = 1 ORDER BY name ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_category(
        pool: &SqlitePool,
        category: ProductCategory,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE category = $1 ORDER BY name ASC"
        ))
        .bind(category)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateProduct) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&data.name));
        let pricing = data.pricing.as_ref().map(to_json).transpose()?;
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO products (id, name, slug, tagline, description, category, status, is_featured, source_url, demo_url, tech_stack, screenshots, features, pricing, changelog)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&slug)
        .bind(&data.tagline)
        .bind(&data.description)
        .bind(&data.category)
        .bind(&data.status)
        .bind(data.is_featured)
        .bind(&data.source_url)
        .bind(&data.demo_url)
        .bind(to_json(&data.tech_stack)?)
        .bind(to_json(&data.screenshots)?)
        .bind(to_json(&data.features)?)
        .bind(pricing)
        .bind(to_json(&data.changelog)?)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateProduct,
    ) -> Result<Option<Self>, sqlx::Error> {
        let pricing = data.pricing.as_ref().map(to_json).transpose()?;
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE products
               SET name = $2, slug = $3, tagline = $4, description = $5, category = $6,
                   status = $7, is_featured = $8, source_url = $9, demo_url = $10,
                   tech_stack = $11, screenshots = $12, features = $13, pricing = $14,
                   changelog = $15, updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.tagline)
        .bind(&data.description)
        .bind(&data.category)
        .bind(&data.status)
        .bind(data.is_featured)
        .bind(&data.source_url)
        .bind(&data.demo_url)
        .bind(to_json(&data.tech_stack)?)
        .bind(to_json(&data.screenshots)?)
        .bind(to_json(&data.features)?)
        .bind(pricing)
        .bind(to_json(&data.changelog)?)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
