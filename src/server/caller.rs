use crate::album::UserId;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::IntoResponse,
};

/// Identity of the requesting user.
///
/// Authentication is delegated to the gateway in front of this service; it
/// forwards the verified identity in the `X-User-Id` header and every
/// endpoint trusts it. Role checks against that identity happen in the
/// managers, not here.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub UserId);

pub const HEADER_USER_ID_KEY: &str = "X-User-Id";

pub enum CallerExtractionError {
    Missing,
    Malformed,
}

impl IntoResponse for CallerExtractionError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CallerExtractionError::Missing => {
                (StatusCode::UNAUTHORIZED, "Missing X-User-Id header").into_response()
            }
            CallerExtractionError::Malformed => {
                (StatusCode::UNAUTHORIZED, "Malformed X-User-Id header").into_response()
            }
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = CallerExtractionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(HEADER_USER_ID_KEY)
            .ok_or(CallerExtractionError::Missing)?;
        value
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<UserId>().ok())
            .map(Caller)
            .ok_or(CallerExtractionError::Malformed)
    }
}
