//! Handler tests for the team roster

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{ADMIN_ROLE, JwtAuth, JwtConfig, optional_jwt_auth_middleware};
use domain_team::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "team-handler-secret-with-32-plus-chars!";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
}

fn admin_token() -> String {
    jwt()
        .issue_token("admin-1", "admin@club.test", "Admin", &[ADMIN_ROLE.to_string()])
        .unwrap()
}

fn app() -> Router {
    handlers::router(TeamService::new(InMemoryTeamRepository::new())).layer(
        axum::middleware::from_fn_with_state(jwt(), optional_jwt_auth_middleware),
    )
}

fn request(method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_roster_lifecycle() {
    let app = app();
    let token = admin_token();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/",
            Some(json!({ "name": "Ada", "position": "Chair", "display_order": 1 })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response.into_body()).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/{}", id),
            Some(json!({ "active": false })),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let public = app.clone().oneshot(request("GET", "/", None, None)).await.unwrap();
    assert_eq!(json_body(public.into_body()).await, json!([]));

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/{}", id), None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request("DELETE", &format!("/{}", id), None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mutations_require_admin() {
    let response = app()
        .oneshot(request(
            "POST",
            "/",
            Some(json!({ "name": "Ada", "position": "Chair" })),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_photo_url() {
    let response = app()
        .oneshot(request(
            "POST",
            "/",
            Some(json!({ "name": "Ada", "position": "Chair", "photo_url": "ftp//broken" })),
            Some(&admin_token()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
