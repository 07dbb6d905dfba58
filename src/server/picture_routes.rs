use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use super::caller::Caller;
use super::state::{GuardedImageStore, GuardedPictureManager, ServerState};
use crate::album::AlbumId;
use crate::error::ServiceError;
use crate::image_store::{ImageRef, ImageStore};
use crate::picture::{PictureId, PictureUpdate};

#[derive(Deserialize, Debug)]
struct CreatePictureBody {
    pub slot_id: u32,
    pub content: String,
    pub pictured_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Base64-encoded image payload.
    pub image: String,
}

#[derive(Deserialize, Debug)]
struct UpdatePictureBody {
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pictured_at: Option<DateTime<Utc>>,
    /// Base64-encoded replacement image payload.
    pub image: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SearchQuery {
    pub keyword: String,
}

/// Decodes and stashes the uploaded payload, returning the reference. The
/// caller still owns the reference until the ledger adopts it.
fn store_image_payload(
    images: &dyn ImageStore,
    encoded: &str,
) -> Result<ImageRef, Response> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Malformed image payload").into_response())?;
    images.store(&bytes).map_err(|e| {
        warn!("Failed to store image payload: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

fn release_orphan(images: &dyn ImageStore, image_ref: &ImageRef) {
    if let Err(e) = images.release(image_ref) {
        warn!("Failed to release orphaned image {}: {}", image_ref.0, e);
    }
}

async fn post_picture(
    caller: Caller,
    State(pictures): State<GuardedPictureManager>,
    State(images): State<GuardedImageStore>,
    Path(album_id): Path<AlbumId>,
    Json(body): Json<CreatePictureBody>,
) -> Response {
    let image_ref = match store_image_payload(images.as_ref(), &body.image) {
        Ok(image_ref) => image_ref,
        Err(response) => return response,
    };

    match pictures.create_in_slot(
        album_id,
        caller.0,
        body.slot_id,
        &body.content,
        body.pictured_at,
        &image_ref,
        &body.tags,
    ) {
        Ok(picture_id) => (StatusCode::CREATED, Json(picture_id)).into_response(),
        Err(e) => {
            // the ledger never adopted the payload
            release_orphan(images.as_ref(), &image_ref);
            e.into_response()
        }
    }
}

async fn get_pictures(
    caller: Caller,
    State(pictures): State<GuardedPictureManager>,
    Path(album_id): Path<AlbumId>,
) -> Result<Response, ServiceError> {
    let snapshot = pictures.pictures_in_slots(album_id, caller.0)?;
    Ok(Json(snapshot).into_response())
}

async fn get_picture(
    caller: Caller,
    State(pictures): State<GuardedPictureManager>,
    Path((album_id, picture_id)): Path<(AlbumId, PictureId)>,
) -> Result<Response, ServiceError> {
    let picture = pictures.get_picture(album_id, caller.0, picture_id)?;
    Ok(Json(picture).into_response())
}

async fn patch_picture(
    caller: Caller,
    State(pictures): State<GuardedPictureManager>,
    State(images): State<GuardedImageStore>,
    Path((album_id, picture_id)): Path<(AlbumId, PictureId)>,
    Json(body): Json<UpdatePictureBody>,
) -> Response {
    let image_ref = match &body.image {
        Some(encoded) => match store_image_payload(images.as_ref(), encoded) {
            Ok(image_ref) => Some(image_ref),
            Err(response) => return response,
        },
        None => None,
    };

    let update = PictureUpdate {
        content: body.content,
        tags: body.tags,
        pictured_at: body.pictured_at,
        image_ref: image_ref.clone(),
    };
    match pictures.update_picture(album_id, caller.0, picture_id, update) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            if let Some(image_ref) = &image_ref {
                release_orphan(images.as_ref(), image_ref);
            }
            e.into_response()
        }
    }
}

async fn delete_picture(
    caller: Caller,
    State(pictures): State<GuardedPictureManager>,
    Path((album_id, picture_id)): Path<(AlbumId, PictureId)>,
) -> Result<Response, ServiceError> {
    pictures.delete_picture(album_id, caller.0, picture_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn search_tags(
    caller: Caller,
    State(pictures): State<GuardedPictureManager>,
    Path(album_id): Path<AlbumId>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, ServiceError> {
    let matches = pictures.search_tags(album_id, caller.0, &query.keyword)?;
    Ok(Json(matches).into_response())
}

pub fn picture_routes() -> Router<ServerState> {
    Router::new()
        .route("/{album_id}/pictures", post(post_picture).get(get_pictures))
        .route(
            "/{album_id}/pictures/{picture_id}",
            get(get_picture).patch(patch_picture).delete(delete_picture),
        )
        .route("/{album_id}/tags", get(search_tags))
}
