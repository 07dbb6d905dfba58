use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::caller::Caller;
use super::state::{GuardedAlbumManager, ServerState};
use crate::album::{AlbumId, UserId};
use crate::error::ServiceError;

#[derive(Deserialize, Debug)]
struct CreateAlbumBody {
    pub name: String,
    #[serde(default)]
    pub member_user_ids: HashSet<UserId>,
    #[serde(default)]
    pub guest_user_ids: HashSet<UserId>,
}

#[derive(Deserialize, Debug)]
struct UpdateAlbumBody {
    pub name: Option<String>,
    pub member_user_ids: Option<HashSet<UserId>>,
    pub guest_user_ids: Option<HashSet<UserId>>,
}

#[derive(Serialize)]
struct CreateAlbumResponse {
    album_id: AlbumId,
}

#[derive(Serialize)]
struct RoleResponse {
    role: Option<&'static str>,
}

async fn post_album(
    caller: Caller,
    State(albums): State<GuardedAlbumManager>,
    Json(body): Json<CreateAlbumBody>,
) -> Result<Response, ServiceError> {
    let album_id = albums.create_album(
        &body.name,
        caller.0,
        body.member_user_ids,
        body.guest_user_ids,
    )?;
    Ok((StatusCode::CREATED, Json(CreateAlbumResponse { album_id })).into_response())
}

async fn patch_album(
    caller: Caller,
    State(albums): State<GuardedAlbumManager>,
    Path(album_id): Path<AlbumId>,
    Json(body): Json<UpdateAlbumBody>,
) -> Result<Response, ServiceError> {
    albums.update_album(
        album_id,
        caller.0,
        body.name.as_deref(),
        body.member_user_ids,
        body.guest_user_ids,
    )?;
    Ok(StatusCode::OK.into_response())
}

async fn delete_album(
    caller: Caller,
    State(albums): State<GuardedAlbumManager>,
    Path(album_id): Path<AlbumId>,
) -> Result<Response, ServiceError> {
    albums.delete_album(album_id, caller.0)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn get_my_role(
    caller: Caller,
    State(albums): State<GuardedAlbumManager>,
    Path(album_id): Path<AlbumId>,
) -> Result<Response, ServiceError> {
    let role = albums.get_role(album_id, caller.0)?;
    Ok(Json(RoleResponse {
        role: role.map(|r| r.as_str()),
    })
    .into_response())
}

pub fn album_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(post_album))
        .route("/{album_id}", patch(patch_album).delete(delete_album))
        .route("/{album_id}/roles/me", get(get_my_role))
}
