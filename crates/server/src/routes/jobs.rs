//! Careers routes. Public listing shows open positions only.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::job::{CreateJob, Job, UpdateJob};
use utils::{
    list::{self, ListQuery},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/jobs
pub async fn list_open(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Job>>>, ApiError> {
    let jobs = Job::find_open(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(jobs)))
}

/// GET /api/jobs/all
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Job>>>, ApiError> {
    let jobs = Job::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(list::apply(jobs, &query))))
}

/// GET /api/jobs/slug/{slug}
pub async fn get_job_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    let job = Job::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or(ApiError::NotFound("job"))?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    let job = Job::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("job"))?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateJob>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    payload.validate()?;
    let job = Job::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

/// PUT /api/jobs/{id}
pub async fn update_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateJob>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    payload.validate()?;
    let job = Job::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("job"))?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

/// DELETE /api/jobs/{id}
pub async fn delete_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = Job::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("job"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/jobs",
        Router::new()
            .route("/", get(list_open).post(create_job))
            .route("/all", get(list_all))
            .route("/slug/{slug}", get(get_job_by_slug))
            .route("/{id}", get(get_job).put(update_job).delete(delete_job)),
    )
}
