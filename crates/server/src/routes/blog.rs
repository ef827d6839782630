//! Blog routes. The public surface only ever sees published posts;
//! drafts are admin-only and addressed by id.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use utils::{
    list::{self, ListQuery},
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/blog
pub async fn list_published(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<BlogPost>>>, ApiError> {
    let posts = BlogPost::find_published(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(posts)))
}

/// GET /api/blog/all — drafts included, for the admin table.
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<BlogPost>>>, ApiError> {
    let posts = BlogPost::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(list::apply(
        posts, &query,
    ))))
}

/// GET /api/blog/slug/{slug}
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<BlogPost>>, ApiError> {
    let post = BlogPost::find_by_slug(state.pool(), &slug)
        .await?
        .filter(|p| p.published)
        .ok_or(ApiError::NotFound("blog post"))?;
    Ok(ResponseJson(ApiResponse::success(post)))
}

/// GET /api/blog/{id}
pub async fn get_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<BlogPost>>, ApiError> {
    let post = BlogPost::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("blog post"))?;
    Ok(ResponseJson(ApiResponse::success(post)))
}

/// POST /api/blog
pub async fn create_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateBlogPost>,
) -> Result<ResponseJson<ApiResponse<BlogPost>>, ApiError> {
    payload.validate()?;
    let post = BlogPost::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(post)))
}

/// PUT /api/blog/{id}
pub async fn update_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateBlogPost>,
) -> Result<ResponseJson<ApiResponse<BlogPost>>, ApiError> {
    payload.validate()?;
    let post = BlogPost::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("blog post"))?;
    Ok(ResponseJson(ApiResponse::success(post)))
}

/// DELETE /api/blog/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = BlogPost::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("blog post"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/blog",
        Router::new()
            .route("/", get(list_published).post(create_post))
            .route("/all", get(list_all))
            .route("/slug/{slug}", get(get_post_by_slug))
            .route("/{id}", get(get_post).put(update_post).delete(delete_post)),
    )
}
