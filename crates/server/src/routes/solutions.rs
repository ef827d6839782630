//! Routes for solutions (products, kits and labs offered as packages).

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::solution::{CreateSolution, Solution, SolutionStatus, UpdateSolution};
use serde::Deserialize;
use utils::{
    list::{self, ListQuery, SortDir},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SolutionListQuery {
    pub status: Option<SolutionStatus>,
    pub q: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: SortDir,
}

/// GET /api/solutions
pub async fn list_solutions(
    State(state): State<AppState>,
    Query(query): Query<SolutionListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Solution>>>, ApiError> {
    let rows = match query.status {
        Some(status) => Solution::find_by_status(state.pool(), status).await?,
        None => Solution::find_all(state.pool()).await?,
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

/// GET /api/solutions/slug/{slug}
pub async fn get_solution_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<Solution>>, ApiError> {
    let solution = Solution::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or(ApiError::NotFound("solution"))?;
    Ok(ResponseJson(ApiResponse::success(solution)))
}

/// GET /api/solutions/{id}
pub async fn get_solution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Solution>>, ApiError> {
    let solution = Solution::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("solution"))?;
    Ok(ResponseJson(ApiResponse::success(solution)))
}

/// POST /api/solutions
pub async fn create_solution(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateSolution>,
) -> Result<ResponseJson<ApiResponse<Solution>>, ApiError> {
    payload.validate()?;
    let solution = Solution::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(solution)))
}

/// PUT /api/solutions/{id}
pub async fn update_solution(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateSolution>,
) -> Result<ResponseJson<ApiResponse<Solution>>, ApiError> {
    payload.validate()?;
    let solution = Solution::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("solution"))?;
    Ok(ResponseJson(ApiResponse::success(solution)))
}

/// DELETE /api/solutions/{id}
pub async fn delete_solution(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = Solution::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("solution"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/solutions",
        Router::new()
            .route("/", get(list_solutions).post(create_solution))
            .route("/slug/{slug}", get(get_solution_by_slug))
            .route(
                "/{id}",
                get(get_solution)
                    .put(update_solution)
                    .delete(delete_solution),
            ),
    )
}
