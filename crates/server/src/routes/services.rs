//! Routes for the services catalog.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::service::{CreateService, Service, UpdateService};
use serde::Deserialize;
use utils::{
    list::{self, ListQuery, SortDir},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ServiceListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: SortDir,
}

/// GET /api/services
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Service>>>, ApiError> {
    let rows = match query.category.as_deref() {
        Some(category) if !category.is_empty() => {
            Service::find_by_category(state.pool(), category).await?
        }
        _ => Service::find_all(state.pool()).await?,
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

/// GET /api/services/slug/{slug}
pub async fn get_service_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<Service>>, ApiError> {
    let service = Service::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or(ApiError::NotFound("service"))?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

/// GET /api/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Service>>, ApiError> {
    let service = Service::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("service"))?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

/// POST /api/services
pub async fn create_service(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateService>,
) -> Result<ResponseJson<ApiResponse<Service>>, ApiError> {
    payload.validate()?;
    let service = Service::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

/// PUT /api/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateService>,
) -> Result<ResponseJson<ApiResponse<Service>>, ApiError> {
    payload.validate()?;
    let service = Service::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("service"))?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

/// DELETE /api/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = Service::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("service"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/services",
        Router::new()
            .route("/", get(list_services).post(create_service))
            .route("/slug/{slug}", get(get_service_by_slug))
            .route(
                "/{id}",
                get(get_service).put(update_service).delete(delete_service),
            ),
    )
}
