//! Company journey timeline routes.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::timeline_event::{CreateTimelineEvent, TimelineEvent, UpdateTimelineEvent};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/timeline — ordered by position.
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<TimelineEvent>>>, ApiError> {
    let events = TimelineEvent::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(events)))
}

/// GET /api/timeline/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<TimelineEvent>>, ApiError> {
    let event = TimelineEvent::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("timeline event"))?;
    Ok(ResponseJson(ApiResponse::success(event)))
}

/// POST /api/timeline
pub async fn create_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    axum::Json(payload): axum::Json<CreateTimelineEvent>,
) -> Result<ResponseJson<ApiResponse<TimelineEvent>>, ApiError> {
    payload.validate()?;
    let event = TimelineEvent::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(event)))
}

/// PUT /api/timeline/{id}
pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateTimelineEvent>,
) -> Result<ResponseJson<ApiResponse<TimelineEvent>>, ApiError> {
    payload.validate()?;
    let event = TimelineEvent::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("timeline event"))?;
    Ok(ResponseJson(ApiResponse::success(event)))
}

/// DELETE /api/timeline/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = TimelineEvent::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("timeline event"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/timeline",
        Router::new()
            .route("/", get(list_events).post(create_event))
            .route(
                "/{id}",
                get(get_event).put(update_event).delete(delete_event),
            ),
    )
}
