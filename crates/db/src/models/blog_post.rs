use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::{ValidationError, from_json_or_default, require_non_empty, require_valid_slug, to_json};

const SELECT_COLUMNS: &str =
    "id, title, slug, content, tags, published, published_at, created_at, updated_at";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Rendered HTML from the rich-text editor; stored verbatim.
    pub content: String,
    pub tags: String, // JSON array of strings
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn parsed_tags(&self) -> Vec<String> {
        from_json_or_default(&self.tags)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

impl CreateBlogPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        if let Some(slug) = &self.slug {
            require_valid_slug(slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateBlogPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published: bool,
}

impl UpdateBlogPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("title", &self.title)?;
        require_valid_slug(&self.slug)
    }
}

impl BlogPost {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM blog_posts ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Published posts, newest first. The public blog only sees these.
    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM blog_posts WHERE published = 1 ORDER BY published_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM blog_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM blog_posts WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateBlogPost) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| utils::slug::slugify(&data.title));
        let published_at = data.published.then(Utc::now);
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO blog_posts (id, title, slug, content, tags, published, published_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&slug)
        .bind(&data.content)
        .bind(to_json(&data.tags)?)
        .bind(data.published)
        .bind(published_at)
        .fetch_one(pool)
        .await
    }

    /// Full-row update. `published_at` is stamped on the unpublished ->
    /// published transition and cleared when a post is unpublished.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateBlogPost,
    ) -> Result<Option<Self>, sqlx::Error> {
        let existing = match Self::find_by_id(pool, id).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        let published_at = match (existing.published, data.published) {
            (false, true) => Some(Utc::now()),
            (_, false) => None,
            (true, true) => existing.published_at,
        };

        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE blog_posts
               SET title = $2, slug = $3, content = $4, tags = $5, published = $6, published_at = $7,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.content)
        .bind(to_json(&data.tags)?)
        .bind(data.published)
        .bind(published_at)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
