//! Admin authentication extractor.
//!
//! Admin handlers take an [`AdminUser`] parameter; the extractor resolves
//! the bearer token to an explicit [`AuthContext`] or rejects with 401.
//! No handler reads ambient session state.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use services::services::auth::{AuthContext, AuthService};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthContext);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let context = AuthService::authenticate(state.pool(), token).await?;
        Ok(AdminUser(context))
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn headers_with_auth(value: Option<&str>) -> HeaderMap {
        let mut builder = Request::builder().uri("/api/services");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts.headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert_eq!(bearer_token(&headers_with_auth(None)), None);
        assert_eq!(bearer_token(&headers_with_auth(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&headers_with_auth(Some("Bearer "))), None);
    }
}
