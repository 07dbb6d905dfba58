mod common;

use common::{TestClient, TestServer, GUEST, MEMBER, OUTSIDER, OWNER};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn member_fills_slot_guest_searches() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let member = TestClient::new(server.base_url.clone(), MEMBER);
    let guest = TestClient::new(server.base_url.clone(), GUEST);

    let album_id = owner.create_album_ok("trip", &[MEMBER], &[GUEST]).await;
    let picture_id = member.create_picture_ok(album_id, 1, &["sunset", "beach"]).await;

    // guests may look but not touch
    let response = guest.create_picture(album_id, 2, &[]).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = owner.search_tags(album_id, "sun").await;
    assert_eq!(response.status(), StatusCode::OK);
    let matches: Value = response.json().await.unwrap();
    assert_eq!(matches.as_array().unwrap().len(), 1);
    assert_eq!(matches[0]["tag"].as_str(), Some("sunset"));
    assert_eq!(matches[0]["picture_id"].as_i64(), Some(picture_id));

    let response = guest.search_tags(album_id, "beach").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn occupied_slot_conflicts() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let album_id = owner.create_album_ok("trip", &[], &[]).await;

    owner.create_picture_ok(album_id, 1, &[]).await;
    let response = owner.create_picture(album_id, 1, &[]).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // a failed insert must not leak its image payload
    let leftovers = std::fs::read_dir(&server.media_dir).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[tokio::test]
async fn slot_outside_range_is_bad_request() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let album_id = owner.create_album_ok("trip", &[], &[]).await;

    for slot_id in [0, 5] {
        let response = owner.create_picture(album_id, slot_id, &[]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "slot {}", slot_id);
    }
}

#[tokio::test]
async fn malformed_image_payload_is_bad_request() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let album_id = owner.create_album_ok("trip", &[], &[]).await;

    let response = owner
        .create_picture_with_body(
            album_id,
            json!({
                "slot_id": 1,
                "content": "oops",
                "pictured_at": "2026-08-30T12:00:00Z",
                "image": "not base64!!!",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_reports_slot_count_and_skips_gaps() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let guest = TestClient::new(server.base_url.clone(), GUEST);
    let album_id = owner.create_album_ok("trip", &[], &[GUEST]).await;

    owner.create_picture_ok(album_id, 3, &[]).await;
    owner.create_picture_ok(album_id, 1, &[]).await;

    let response = guest.get_pictures(album_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["slot_count"].as_u64(), Some(4));
    let pictures = body["pictures"].as_array().unwrap();
    assert_eq!(pictures.len(), 2);
    assert_eq!(pictures[0]["slot_id"].as_u64(), Some(1));
    assert_eq!(pictures[1]["slot_id"].as_u64(), Some(3));

    let response = TestClient::new(server.base_url.clone(), OUTSIDER)
        .get_pictures(album_id)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn update_swaps_tags_and_image() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let album_id = owner.create_album_ok("trip", &[], &[]).await;
    let picture_id = owner.create_picture_ok(album_id, 1, &["sunset"]).await;

    let response = owner
        .update_picture(
            album_id,
            picture_id,
            json!({
                "content": "same four, better light",
                "tags": ["Harbor"],
                "image": "bmV3IHBpeGVscw==", // "new pixels"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // the replaced payload was released, only the new one remains
    let leftovers = std::fs::read_dir(&server.media_dir).unwrap().count();
    assert_eq!(leftovers, 1);

    let picture: Value = owner
        .get_picture(album_id, picture_id)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(picture["content"].as_str(), Some("same four, better light"));
    assert_eq!(picture["tags"][0].as_str(), Some("harbor"));

    let matches: Value = owner.search_tags(album_id, "sunset").await.json().await.unwrap();
    assert!(matches.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_frees_the_slot() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let member = TestClient::new(server.base_url.clone(), MEMBER);
    let guest = TestClient::new(server.base_url.clone(), GUEST);
    let album_id = owner.create_album_ok("trip", &[MEMBER], &[GUEST]).await;
    let picture_id = owner.create_picture_ok(album_id, 1, &[]).await;

    let response = guest.delete_picture(album_id, picture_id).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = member.delete_picture(album_id, picture_id).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let leftovers = std::fs::read_dir(&server.media_dir).unwrap().count();
    assert_eq!(leftovers, 0);

    // the slot is reusable
    member.create_picture_ok(album_id, 1, &[]).await;
}

#[tokio::test]
async fn search_validates_keyword_and_scope() {
    let server = TestServer::spawn().await;
    let owner = TestClient::new(server.base_url.clone(), OWNER);
    let album_id = owner.create_album_ok("trip", &[], &[]).await;
    let other_album_id = owner.create_album_ok("other", &[], &[]).await;
    owner.create_picture_ok(album_id, 1, &["sunset"]).await;

    let response = owner.search_tags(album_id, "   ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // matches never leak across albums
    let matches: Value = owner
        .search_tags(other_album_id, "sunset")
        .await
        .json()
        .await
        .unwrap();
    assert!(matches.as_array().unwrap().is_empty());

    // matching is case-insensitive on both sides
    let matches: Value = owner.search_tags(album_id, "SUN").await.json().await.unwrap();
    assert_eq!(matches.as_array().unwrap().len(), 1);
}
