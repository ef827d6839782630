//! Admin login/logout routes.

use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::Json as ResponseJson,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use services::services::auth::{AuthContext, AuthService};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{
    auth::{AdminUser, bearer_token},
    error::ApiError,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, TS)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the session expires.
    pub expires_in: u64,
    pub user: AuthContext,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, ApiError> {
    let out = AuthService::login(state.pool(), &payload.email, &payload.password).await?;
    Ok(ResponseJson(ApiResponse::success(LoginResponse {
        token: out.token,
        expires_in: out.expires_in,
        user: out.context,
    })))
}

/// POST /api/auth/logout — deletes the presented session. Succeeds even
/// when the token is already gone.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        AuthService::logout(state.pool(), token).await?;
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

/// GET /api/auth/me
pub async fn me(admin: AdminUser) -> ResponseJson<ApiResponse<AuthContext>> {
    ResponseJson(ApiResponse::success(admin.0))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/me", get(me)),
    )
}
