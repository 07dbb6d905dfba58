//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per endpoint. The client impersonates a
//! single user via the `X-User-Id` header; create one client per user.

use super::constants::REQUEST_TIMEOUT_SECS;
use fourcut_album_server::album::{AlbumId, UserId};
use fourcut_album_server::picture::PictureId;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

const USER_ID_HEADER: &str = "X-User-Id";

pub struct TestClient {
    pub client: reqwest::Client,
    pub base_url: String,
    pub user_id: UserId,
}

impl TestClient {
    pub fn new(base_url: String, user_id: UserId) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            user_id,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/albums{}", self.base_url, path)
    }

    pub async fn create_album(&self, name: &str, members: &[UserId], guests: &[UserId]) -> Response {
        self.client
            .post(self.url(""))
            .header(USER_ID_HEADER, self.user_id)
            .json(&json!({
                "name": name,
                "member_user_ids": members,
                "guest_user_ids": guests,
            }))
            .send()
            .await
            .expect("Request failed")
    }

    /// Creates an album and returns its id, asserting success.
    pub async fn create_album_ok(&self, name: &str, members: &[UserId], guests: &[UserId]) -> AlbumId {
        let response = self.create_album(name, members, guests).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Invalid response body");
        body["album_id"].as_i64().expect("Missing album_id")
    }

    pub async fn update_album(&self, album_id: AlbumId, body: Value) -> Response {
        self.client
            .patch(self.url(&format!("/{}", album_id)))
            .header(USER_ID_HEADER, self.user_id)
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn delete_album(&self, album_id: AlbumId) -> Response {
        self.client
            .delete(self.url(&format!("/{}", album_id)))
            .header(USER_ID_HEADER, self.user_id)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_my_role(&self, album_id: AlbumId) -> Response {
        self.client
            .get(self.url(&format!("/{}/roles/me", album_id)))
            .header(USER_ID_HEADER, self.user_id)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn create_picture(&self, album_id: AlbumId, slot_id: u32, tags: &[&str]) -> Response {
        self.create_picture_with_body(
            album_id,
            json!({
                "slot_id": slot_id,
                "content": "four of us in the booth",
                "pictured_at": "2026-08-30T12:00:00Z",
                "tags": tags,
                "image": "cGl4ZWxz", // "pixels"
            }),
        )
        .await
    }

    pub async fn create_picture_with_body(&self, album_id: AlbumId, body: Value) -> Response {
        self.client
            .post(self.url(&format!("/{}/pictures", album_id)))
            .header(USER_ID_HEADER, self.user_id)
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Creates a picture and returns its id, asserting success.
    pub async fn create_picture_ok(
        &self,
        album_id: AlbumId,
        slot_id: u32,
        tags: &[&str],
    ) -> PictureId {
        let response = self.create_picture(album_id, slot_id, tags).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Invalid response body")
    }

    pub async fn get_pictures(&self, album_id: AlbumId) -> Response {
        self.client
            .get(self.url(&format!("/{}/pictures", album_id)))
            .header(USER_ID_HEADER, self.user_id)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_picture(&self, album_id: AlbumId, picture_id: PictureId) -> Response {
        self.client
            .get(self.url(&format!("/{}/pictures/{}", album_id, picture_id)))
            .header(USER_ID_HEADER, self.user_id)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn update_picture(
        &self,
        album_id: AlbumId,
        picture_id: PictureId,
        body: Value,
    ) -> Response {
        self.client
            .patch(self.url(&format!("/{}/pictures/{}", album_id, picture_id)))
            .header(USER_ID_HEADER, self.user_id)
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn delete_picture(&self, album_id: AlbumId, picture_id: PictureId) -> Response {
        self.client
            .delete(self.url(&format!("/{}/pictures/{}", album_id, picture_id)))
            .header(USER_ID_HEADER, self.user_id)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn search_tags(&self, album_id: AlbumId, keyword: &str) -> Response {
        self.client
            .get(self.url(&format!("/{}/tags", album_id)))
            .query(&[("keyword", keyword)])
            .header(USER_ID_HEADER, self.user_id)
            .send()
            .await
            .expect("Request failed")
    }
}
