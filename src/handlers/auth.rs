use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::utils::error::AppError;

/// Header set by the upstream auth layer; authentication itself happens
/// before requests reach this service.
const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller identity for every scoped operation.
pub struct CallerId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(CallerId)
            .ok_or_else(|| AppError::AuthError("Missing or invalid user identity".to_string()))
    }
}
