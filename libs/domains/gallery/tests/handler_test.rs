//! Handler tests for the gallery

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{ADMIN_ROLE, JwtAuth, JwtConfig, optional_jwt_auth_middleware};
use domain_gallery::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "gallery-handler-secret-with-32-plus-chars";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
}

fn app() -> Router {
    handlers::router(GalleryService::new(InMemoryPhotoRepository::new())).layer(
        axum::middleware::from_fn_with_state(jwt(), optional_jwt_auth_middleware),
    )
}

fn admin_post(body: Value) -> Request<Body> {
    let token = jwt()
        .issue_token("admin-1", "admin@club.test", "Admin", &[ADMIN_ROLE.to_string()])
        .unwrap();
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_add_then_filter_by_event() {
    let app = app();
    let event_id = uuid::Uuid::now_v7();

    let response = app
        .clone()
        .oneshot(admin_post(json!({
            "title": "Hackathon finals",
            "image_url": "https://cdn.club.test/finals.jpg",
            "event_id": event_id
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let photo = json_body(response.into_body()).await;

    app.clone()
        .oneshot(admin_post(json!({
            "title": "Board photo",
            "image_url": "https://cdn.club.test/board.jpg"
        })))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/?event_id={}", event_id)))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], photo["id"]);

    let response = app
        .oneshot(get(&format!("/{}", photo["id"].as_str().unwrap())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejects_non_http_image_url() {
    let response = app()
        .oneshot(admin_post(json!({
            "title": "Sneaky",
            "image_url": "file:///etc/passwd"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_cannot_add() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "title": "x", "image_url": "https://cdn.club.test/x.jpg" }).to_string(),
        ))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_photo_and_bad_uuid() {
    let response = app()
        .oneshot(get(&format!("/{}", uuid::Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app().oneshot(get("/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
