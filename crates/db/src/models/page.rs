use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SectionKind {
    Hero,
    #[default]
    Content,
    Cta,
    Features,
    Testimonials,
    Custom,
}

/// Per-section presentation overrides. All optional; the renderer falls
/// back to theme defaults.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
pub struct SectionStyles {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    /// Padding preset name, not a CSS value.
    pub padding: Option<String>,
    pub background_image: Option<String>,
}

/// One ordered block of a custom page. `order` is 1-based and always
/// equals the section's position in the list.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub content: String,
    pub order: i64,
    #[serde(default)]
    pub styles: SectionStyles,
}

const SELECT_COLUMNS: &str =
    "id, title, slug, content, sections, is_published, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub sections: String, // JSON array of Section
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn parsed_sections(&self) -> Vec<Section> {
        from_json_or_default(&self.sections)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreatePage {
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub is_published: bool,
}

impl CreatePage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        if let Some(slug) = &self.slug {
            require_valid_slug(slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdatePage {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub is_published: bool,
}

impl UpdatePage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_valid_slug(&self.slug)
    }
}

impl Page {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM pages ORDER BY title ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM pages WHERE is_published = 1 ORDER BY title ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {SELECT_COLUMNS} FROM pages WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM pages WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreatePage) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&data.title));
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO pages (id, title, slug, content, sections, is_published)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&slug)
        .bind(&data.content)
        .bind(to_json(&data.sections)?)
        .bind(data.is_published)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdatePage,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE pages
               SET title = $2, slug = $3, content = $4, sections = $5, is_published = $6,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.content)
        .bind(to_json(&data.sections)?)
        .bind(data.is_published)
        .fetch_optional(pool)
        .await
    }

    /// Replace only the section list, leaving the rest of the page alone.
    /// Used by the reorder endpoint.
    pub async fn update_sections(
        pool: &SqlitePool,
        id: Uuid,
        sections: &[Section],
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE pages
               SET sections = $2, updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(to_json(&sections)?)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
