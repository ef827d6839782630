//! Site settings routes. Individual keys are public reads so the site
//! can fetch hero copy and process steps; everything else is admin.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::setting::{Setting, UpsertSetting};
use utils::response::ApiResponse;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/settings
pub async fn list_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<ResponseJson<ApiResponse<Vec<Setting>>>, ApiError> {
    let settings = Setting::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(settings)))
}

/// GET /api/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ResponseJson<ApiResponse<Setting>>, ApiError> {
    let setting = Setting::find_by_key(state.pool(), &key)
        .await?
        .ok_or(ApiError::NotFound("setting"))?;
    Ok(ResponseJson(ApiResponse::success(setting)))
}

/// PUT /api/settings — insert or replace by key.
pub async fn upsert_setting(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<UpsertSetting>,
) -> Result<ResponseJson<ApiResponse<Setting>>, ApiError> {
    payload.validate()?;
    let setting = Setting::upsert(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(setting)))
}

/// DELETE /api/settings/{key}
pub async fn delete_setting(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = Setting::delete_by_key(state.pool(), &key).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("setting"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/settings",
        Router::new()
            .route("/", get(list_settings).put(upsert_setting))
            .route("/{key}", get(get_setting).delete(delete_setting)),
    )
}
