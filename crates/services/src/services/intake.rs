//! Lead intake: contact form and the 5-step wizard.
//!
//! Both flows validate before any SQL runs and produce a [`CreateLead`]
//! for the write-only leads table. The wizard keeps no server-side state
//! between steps; the client submits the full answer set at the end.

use db::models::lead::{CreateLead, Lead, LeadSource, WizardData};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("{0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}

/// Final payload of the intake wizard. Steps 1-4 collect the project
/// answers, step 5 the contact details; the terminal thank-you step has
/// no data.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct WizardSubmission {
    pub project_type: String,
    #[serde(default)]
    pub goals: Vec<String>,
    pub budget: String,
    pub timeline: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
}

pub struct IntakeService;

impl IntakeService {
    pub async fn submit_contact(
        pool: &SqlitePool,
        submission: ContactSubmission,
    ) -> Result<Lead, IntakeError> {
        require_field("name", &submission.name)?;
        require_email(&submission.email)?;
        require_field("message", &submission.message)?;

        let lead = Lead::create(
            pool,
            &CreateLead {
                name: submission.name,
                email: submission.email,
                company: submission.company,
                message: Some(submission.message),
                source: LeadSource::Contact,
                wizard_data: None,
            },
        )
        .await?;

        info!(lead_id = %lead.id, "contact lead captured");
        Ok(lead)
    }

    pub async fn submit_wizard(
        pool: &SqlitePool,
        submission: WizardSubmission,
    ) -> Result<Lead, IntakeError> {
        require_field("project type", &submission.project_type)?;
        require_field("budget", &submission.budget)?;
        require_field("timeline", &submission.timeline)?;
        require_field("name", &submission.name)?;
        require_email(&submission.email)?;

        let lead = Lead::create(
            pool,
            &CreateLead {
                name: submission.name,
                email: submission.email,
                company: submission.company,
                message: None,
                source: LeadSource::Wizard,
                wizard_data: Some(WizardData {
                    project_type: submission.project_type,
                    goals: submission.goals,
                    budget: submission.budget,
                    timeline: submission.timeline,
                }),
            },
        )
        .await?;

        info!(lead_id = %lead.id, "wizard lead captured");
        Ok(lead)
    }
}

fn require_field(field: &str, value: &str) -> Result<(), IntakeError> {
    if value.trim().is_empty() {
        return Err(IntakeError::Invalid(format!("{field} is required")));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), IntakeError> {
    // Deliverability is the mail server's problem; this only catches
    // obviously-not-an-address input.
    let looks_ok = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !looks_ok {
        return Err(IntakeError::Invalid(format!("invalid email: {email:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> WizardSubmission {
        WizardSubmission {
            project_type: "saas".into(),
            goals: vec!["mvp".into()],
            budget: "25-50k".into(),
            timeline: "q4".into(),
            name: "Jo".into(),
            email: "jo@example.com".into(),
            company: Some("Acme".into()),
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(require_email("a@b.co").is_ok());
        assert!(require_email("nope").is_err());
        assert!(require_email("@b.co").is_err());
        assert!(require_email("a@nodot").is_err());
        assert!(require_email("a@.start").is_err());
    }

    #[tokio::test]
    async fn wizard_submission_creates_lead_with_data() {
        let db = db::DbService::new_in_memory().await.unwrap();
        let lead = IntakeService::submit_wizard(&db.pool, wizard())
            .await
            .unwrap();
        assert_eq!(lead.source, LeadSource::Wizard);
        let data = lead.parsed_wizard_data().unwrap();
        assert_eq!(data.budget, "25-50k");
    }

    #[tokio::test]
    async fn missing_wizard_fields_block_before_sql() {
        let db = db::DbService::new_in_memory().await.unwrap();
        let mut bad = wizard();
        bad.budget = "  ".into();

        let err = IntakeService::submit_wizard(&db.pool, bad).await;
        assert!(matches!(err, Err(IntakeError::Invalid(_))));
        assert_eq!(Lead::count(&db.pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn contact_submission_creates_contact_lead() {
        let db = db::DbService::new_in_memory().await.unwrap();
        let lead = IntakeService::submit_contact(
            &db.pool,
            ContactSubmission {
                name: "Jo".into(),
                email: "jo@example.com".into(),
                company: None,
                message: "hello".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(lead.source, LeadSource::Contact);
        assert!(lead.wizard_data.is_none());
    }
}
