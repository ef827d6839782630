use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::to_json;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[sqlx(type_name = "lead_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeadSource {
    #[default]
    Contact,
    Wizard,
}

/// Answers collected by the 5-step intake wizard, kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
pub struct WizardData {
    pub project_type: String,
    #[serde(default)]
    pub goals: Vec<String>,
    pub budget: String,
    pub timeline: String,
}

const SELECT_COLUMNS: &str = "id, name, email, company, message, source, wizard_data, created_at";

/// Write-only intake record; never edited, only listed and deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub source: LeadSource,
    pub wizard_data: Option<String>, // JSON WizardData
    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn parsed_wizard_data(&self) -> Option<WizardData> {
        self.wizard_data
            .as_ref()
            .and_then(|json| serde_json::from_str(json).ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub source: LeadSource,
    pub wizard_data: Option<WizardData>,
}

impl Lead {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {SELECT_COLUMNS} FROM leads ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {SELECT_COLUMNS} FROM leads WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateLead) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let wizard_data = data.wizard_data.as_ref().map(to_json).transpose()?;
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO leads (id, name, email, company, message, source, wizard_data)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.company)
        .bind(&data.message)
        .bind(&data.source)
        .bind(wizard_data)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await
    }
}
