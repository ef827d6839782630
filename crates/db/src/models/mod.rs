pub mod blog_post;
pub mod case_study;
pub mod job;
pub mod lab_item;
pub mod lead;
pub mod page;
pub mod product;
pub mod service;
pub mod session;
pub mod setting;
pub mod solution;
pub mod timeline_event;
pub mod user;

use serde::{Serialize, de::DeserializeOwned};

/// Serialize a typed sub-document for storage in a TEXT column.
///
/// Payloads carry typed values, so the only way this fails is a
/// non-serializable type, which is a programming error surfaced the same
/// way the rest of the model layer surfaces faults.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, sqlx::Error> {
    serde_json::to_string(value).map_err(|e| sqlx::Error::Protocol(e.to_string()))
}

/// Parse a stored JSON sub-document, degrading to the default on rows
/// written before validation existed.
pub(crate) fn from_json_or_default<T: DeserializeOwned + Default>(raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Validation failure raised before any SQL runs.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn require_valid_slug(slug: &str) -> Result<(), ValidationError> {
    if !utils::slug::is_valid(slug) {
        return Err(ValidationError::new(format!("invalid slug: {slug:?}")));
    }
    Ok(())
}
