//! Routes for case studies, with the public industry filter.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::case_study::{CaseStudy, CreateCaseStudy, UpdateCaseStudy};
use serde::Deserialize;
use utils::{
    list::{self, ListQuery, SortDir},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CaseStudyListQuery {
    pub industry: Option<String>,
    pub q: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: SortDir,
}

/// GET /api/case-studies
pub async fn list_case_studies(
    State(state): State<AppState>,
    Query(query): Query<CaseStudyListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<CaseStudy>>>, ApiError> {
    let rows = match query.industry.as_deref() {
        Some(industry) if !industry.is_empty() => {
            CaseStudy::find_by_industry(state.pool(), industry).await?
        }
        _ => CaseStudy::find_all(state.pool()).await?,
    };
    let list_query = ListQuery {
        q: query.q,
        sort_by: query.sort_by,
        sort_dir: query.sort_dir,
    };
    Ok(ResponseJson(ApiResponse::success(list::apply(
        rows,
        &list_query,
    ))))
}

/// GET /api/case-studies/industries
pub async fn list_industries(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<String>>>, ApiError> {
    let industries = CaseStudy::industries(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(industries)))
}

/// GET /api/case-studies/slug/{slug}
pub async fn get_case_study_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<CaseStudy>>, ApiError> {
    let case_study = CaseStudy::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or(ApiError::NotFound("case study"))?;
    Ok(ResponseJson(ApiResponse::success(case_study)))
}

/// GET /api/case-studies/{id}
pub async fn get_case_study(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<CaseStudy>>, ApiError> {
    let case_study = CaseStudy::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("case study"))?;
    Ok(ResponseJson(ApiResponse::success(case_study)))
}

/// POST /api/case-studies
pub async fn create_case_study(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateCaseStudy>,
) -> Result<ResponseJson<ApiResponse<CaseStudy>>, ApiError> {
    payload.validate()?;
    let case_study = CaseStudy::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(case_study)))
}

/// PUT /api/case-studies/{id}
pub async fn update_case_study(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateCaseStudy>,
) -> Result<ResponseJson<ApiResponse<CaseStudy>>, ApiError> {
    payload.validate()?;
    let case_study = CaseStudy::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("case study"))?;
    Ok(ResponseJson(ApiResponse::success(case_study)))
}

/// DELETE /api/case-studies/{id}
pub async fn delete_case_study(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = CaseStudy::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("case study"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/case-studies",
        Router::new()
            .route("/", get(list_case_studies).post(create_case_study))
            .route("/industries", get(list_industries))
            .route("/slug/{slug}", get(get_case_study_by_slug))
            .route(
                "/{id}",
                get(get_case_study)
                    .put(update_case_study)
                    .delete(delete_case_study),
            ),
    )
}
