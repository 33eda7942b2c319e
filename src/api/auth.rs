use crate::application::admin::{self, AdminApplicationError, AdminClaims};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;

use super::{error::ApiError, handlers::AppState};

/// Extractor for an authenticated admin (`Authorization: Bearer <idToken>`)
#[derive(Debug)]
pub struct AdminSession(pub AdminClaims);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AdminApplicationError::InvalidToken(None))?;

        let claims = admin::verify_token(&state.admin, token)?;

        Ok(AdminSession(claims))
    }
}
