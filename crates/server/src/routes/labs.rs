//! Routes for the labs page experiments.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::lab_item::{CreateLabItem, LabItem, UpdateLabItem};
use utils::{
    list::{self, ListQuery},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/labs
pub async fn list_lab_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<LabItem>>>, ApiError> {
    let items = LabItem::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(list::apply(
        items, &query,
    ))))
}

/// GET /api/labs/slug/{slug}
pub async fn get_lab_item_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<LabItem>>, ApiError> {
    let item = LabItem::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or(ApiError::NotFound("lab item"))?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

/// GET /api/labs/{id}
pub async fn get_lab_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<LabItem>>, ApiError> {
    let item = LabItem::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("lab item"))?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

/// POST /api/labs
pub async fn create_lab_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateLabItem>,
) -> Result<ResponseJson<ApiResponse<LabItem>>, ApiError> {
    payload.validate()?;
    let item = LabItem::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

/// PUT /api/labs/{id}
pub async fn update_lab_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateLabItem>,
) -> Result<ResponseJson<ApiResponse<LabItem>>, ApiError> {
    payload.validate()?;
    let item = LabItem::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("lab item"))?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

/// DELETE /api/labs/{id}
pub async fn delete_lab_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = LabItem::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("lab item"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/labs",
        Router::new()
            .route("/", get(list_lab_items).post(create_lab_item))
            .route("/slug/{slug}", get(get_lab_item_by_slug))
            .route(
                "/{id}",
                get(get_lab_item)
                    .put(update_lab_item)
                    .delete(delete_lab_item),
            ),
    )
}
