mod album_routes;
mod caller;
pub mod config;
mod picture_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
#[allow(unused_imports)] // Used by main.rs
pub use server::{make_app, run_server};

use crate::error::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::AlbumNotFound(_) | ServiceError::PictureNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            ServiceError::InvalidMembership(_)
            | ServiceError::InvalidSlot { .. }
            | ServiceError::InvalidKeyword => StatusCode::BAD_REQUEST,
            ServiceError::SlotOccupied { .. } => StatusCode::CONFLICT,
            ServiceError::Store(e) => {
                error!("Store failure: {:#}", e);
                // internal details stay out of the response body
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                );
            }
        };
        error_response(status, self.to_string())
    }
}
