//! Lead routes: public intake on one side, the admin inbox on the other.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::lead::Lead;
use services::services::intake::{ContactSubmission, IntakeService, WizardSubmission};
use utils::{
    list::{self, ListQuery},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// POST /api/leads/contact — public contact form.
pub async fn submit_contact(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<ContactSubmission>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = IntakeService::submit_contact(state.pool(), payload).await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        lead,
        "Thanks, we'll be in touch.".to_string(),
    )))
}

/// POST /api/leads/wizard — full answer set from the intake wizard.
pub async fn submit_wizard(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<WizardSubmission>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = IntakeService::submit_wizard(state.pool(), payload).await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        lead,
        "Thanks, we'll be in touch.".to_string(),
    )))
}

/// GET /api/leads
pub async fn list_leads(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Lead>>>, ApiError> {
    let leads = Lead::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(list::apply(
        leads, &query,
    ))))
}

/// GET /api/leads/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = Lead::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("lead"))?;
    Ok(ResponseJson(ApiResponse::success(lead)))
}

/// DELETE /api/leads/{id}
pub async fn delete_lead(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = Lead::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("lead"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/leads",
        Router::new()
            .route("/", get(list_leads))
            .route("/contact", post(submit_contact))
            .route("/wizard", post(submit_wizard))
            .route("/{id}", get(get_lead).delete(delete_lead)),
    )
}
