//! Product routes: catalog, derived views and the best-effort importer.

use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::product::{CreateProduct, Product, ProductCategory, UpdateProduct};
use serde::Deserialize;
use services::services::importer::ImportedProduct;
use utils::{
    list::{self, ListQuery, SortDir},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    #[serde(default)]
    pub featured: bool,
    pub category: Option<ProductCategory>,
    pub q: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: SortDir,
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Product>>>, ApiError> {
    let rows = if query.featured {
        Product::find_featured(state.pool()).await?
    } else if let Some(category) = query.category {
        Product::find_by_category(state.pool(), category).await?
    } else {
        Product::find_all(state.pool()).await?
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

/// GET /api/products/grouped — catalog grouped by category for the
/// public products page.
pub async fn list_grouped(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<BTreeMap<String, Vec<Product>>>>, ApiError> {
    let rows = Product::find_all(state.pool()).await?;
    let mut grouped: BTreeMap<String, Vec<Product>> = BTreeMap::new();
    for product in rows {
        grouped
            .entry(product.category.to_string())
            .or_default()
            .push(product);
    }
    Ok(ResponseJson(ApiResponse::success(grouped)))
}

/// GET /api/products/slug/{slug}
pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<Product>>, ApiError> {
    let product = Product::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or(ApiError::NotFound("product"))?;
    Ok(ResponseJson(ApiResponse::success(product)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Product>>, ApiError> {
    let product = Product::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("product"))?;
    Ok(ResponseJson(ApiResponse::success(product)))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateProduct>,
) -> Result<ResponseJson<ApiResponse<Product>>, ApiError> {
    payload.validate()?;
    let product = Product::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateProduct>,
) -> Result<ResponseJson<ApiResponse<Product>>, ApiError> {
    payload.validate()?;
    let product = Product::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("product"))?;
    Ok(ResponseJson(ApiResponse::success(product)))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = Product::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("product"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub source_url: String,
}

/// POST /api/products/import — fetch a marketplace listing and extract
/// whatever the heuristics can. Advisory only; the admin form reviews
/// the result before saving.
pub async fn import_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<ImportRequest>,
) -> Result<ResponseJson<ApiResponse<ImportedProduct>>, ApiError> {
    let imported = state.importer().import(&payload.source_url).await?;
    Ok(ResponseJson(ApiResponse::success(imported)))
}

#[derive(Debug, Deserialize)]
pub struct QuickFillRequest {
    pub text: String,
}

/// POST /api/products/quick-fill — same heuristics over pasted text,
/// the fallback for sites that block the fetch.
pub async fn quick_fill_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<QuickFillRequest>,
) -> Result<ResponseJson<ApiResponse<ImportedProduct>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.importer().quick_fill(&payload.text),
    )))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/products",
        Router::new()
            .route("/", get(list_products).post(create_product))
            .route("/grouped", get(list_grouped))
            .route("/import", post(import_product))
            .route("/quick-fill", post(quick_fill_product))
            .route("/slug/{slug}", get(get_product_by_slug))
            .route(
                "/{id}",
                get(get_product).put(update_product).delete(delete_product),
            ),
    )
}
