//! Custom page routes, including the section reorder endpoint used by
//! the admin page builder.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::page::{CreatePage, Page, Section, UpdatePage};
use serde::Deserialize;
use services::services::sections;
use utils::{
    list::{self, ListQuery},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/pages — published pages only.
pub async fn list_published(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Page>>>, ApiError> {
    let pages = Page::find_published(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(pages)))
}

/// GET /api/pages/all
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Page>>>, ApiError> {
    let pages = Page::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(list::apply(
        pages, &query,
    ))))
}

/// GET /api/pages/slug/{slug}
pub async fn get_page_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<Page>>, ApiError> {
    let page = Page::find_by_slug(state.pool(), &slug)
        .await?
        .filter(|p| p.is_published)
        .ok_or(ApiError::NotFound("page"))?;
    Ok(ResponseJson(ApiResponse::success(page)))
}

/// GET /api/pages/{id}
pub async fn get_page(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Page>>, ApiError> {
    let page = Page::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("page"))?;
    Ok(ResponseJson(ApiResponse::success(page)))
}

/// POST /api/pages
pub async fn create_page(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreatePage>,
) -> Result<ResponseJson<ApiResponse<Page>>, ApiError> {
    payload.validate()?;
    sections::validate(&payload.sections)?;

    let mut payload = payload;
    payload.sections = sections::normalize(payload.sections);
    let page = Page::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(page)))
}

/// PUT /api/pages/{id}
pub async fn update_page(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdatePage>,
) -> Result<ResponseJson<ApiResponse<Page>>, ApiError> {
    payload.validate()?;
    sections::validate(&payload.sections)?;

    let mut payload = payload;
    payload.sections = sections::normalize(payload.sections);
    let page = Page::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("page"))?;
    Ok(ResponseJson(ApiResponse::success(page)))
}

/// PUT /api/pages/{id}/sections — save one section from the editor.
/// Replaces the section with the same id or appends a new one.
pub async fn save_section(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<Section>,
) -> Result<ResponseJson<ApiResponse<Page>>, ApiError> {
    let page = Page::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("page"))?;

    let merged = sections::merge(page.parsed_sections(), payload)?;
    let page = Page::update_sections(state.pool(), id, &merged)
        .await?
        .ok_or(ApiError::NotFound("page"))?;
    Ok(ResponseJson(ApiResponse::success(page)))
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

/// PUT /api/pages/{id}/sections/reorder — move one section and persist
/// the renumbered list.
pub async fn reorder_sections(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<ReorderRequest>,
) -> Result<ResponseJson<ApiResponse<Page>>, ApiError> {
    let page = Page::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("page"))?;

    let reordered = sections::reorder(page.parsed_sections(), payload.from, payload.to)?;
    let page = Page::update_sections(state.pool(), id, &reordered)
        .await?
        .ok_or(ApiError::NotFound("page"))?;
    Ok(ResponseJson(ApiResponse::success(page)))
}

/// DELETE /api/pages/{id}
pub async fn delete_page(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = Page::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("page"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/pages",
        Router::new()
            .route("/", get(list_published).post(create_page))
            .route("/all", get(list_all))
            .route("/slug/{slug}", get(get_page_by_slug))
            .route("/{id}", get(get_page).put(update_page).delete(delete_page))
            .route("/{id}/sections", put(save_section))
            .route("/{id}/sections/reorder", put(reorder_sections)),
    )
}
