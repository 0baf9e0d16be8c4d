use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::{Authorization, Bearer};
use axum_extra::TypedHeader;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Id of the caller, taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    tracing::debug!(path = %parts.uri.path(), reason = %e, "missing bearer token");
                    ApiError::unauthorized("Missing or malformed bearer token")
                })?;
        let user_id = state
            .auth
            .authenticate(bearer.token())
            .await
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
        Ok(CurrentUser(user_id))
    }
}
