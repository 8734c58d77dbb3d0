//! Handler tests for the Posts domain

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{ADMIN_ROLE, JwtAuth, JwtConfig, optional_jwt_auth_middleware};
use domain_posts::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDir;
use tower::ServiceExt;

const SECRET: &str = "posts-handler-secret-with-32-plus-chars";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
}

fn admin_token() -> String {
    jwt()
        .issue_token("admin-1", "admin@club.test", "Admin", &[ADMIN_ROLE.to_string()])
        .unwrap()
}

fn app<R: PostRepository + 'static>(repository: R) -> Router {
    handlers::router(PostService::new(repository)).layer(axum::middleware::from_fn_with_state(
        jwt(),
        optional_jwt_auth_middleware,
    ))
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

fn new_post(slug: &str, published: bool) -> Value {
    json!({
        "slug": slug,
        "title": "Spring meetup recap",
        "summary": "What happened",
        "body": "## Notes",
        "author": "Board",
        "tags": ["events"],
        "published": published
    })
}

/// Primary store whose database is unreachable
struct UnreachableStore;

#[async_trait]
impl PostRepository for UnreachableStore {
    async fn create(&self, _post: Post) -> PostResult<Post> {
        Err(PostError::StoreUnavailable("connection refused".to_string()))
    }

    async fn get_by_slug(&self, _slug: &str) -> PostResult<Option<Post>> {
        Err(PostError::StoreUnavailable("connection refused".to_string()))
    }

    async fn list(&self, _query: PostQuery) -> PostResult<Vec<Post>> {
        Err(PostError::StoreUnavailable("connection refused".to_string()))
    }

    async fn update(&self, _post: Post) -> PostResult<Post> {
        Err(PostError::StoreUnavailable("connection refused".to_string()))
    }

    async fn delete(&self, _slug: &str) -> PostResult<bool> {
        Err(PostError::StoreUnavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_admin_creates_public_reads() {
    let app = app(InMemoryPostRepository::new());
    let token = admin_token();

    let response = app
        .clone()
        .oneshot(request("POST", "/", Some(new_post("spring-recap", true)), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request("GET", "/spring-recap", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["title"], "Spring meetup recap");

    let response = app
        .oneshot(request("GET", "/?tag=events", None, None))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_requires_admin() {
    let app = app(InMemoryPostRepository::new());

    let anonymous = app
        .clone()
        .oneshot(request("POST", "/", Some(new_post("x", true)), None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let member = jwt()
        .issue_token("m-1", "m@club.test", "M", &["member".to_string()])
        .unwrap();
    let response = app
        .oneshot(request("POST", "/", Some(new_post("x", true)), Some(&member)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_drafts_are_hidden_and_slugs_are_checked() {
    let app = app(InMemoryPostRepository::new());
    let token = admin_token();

    app.clone()
        .oneshot(request("POST", "/", Some(new_post("draft", false)), Some(&token)))
        .await
        .unwrap();

    let public = app
        .clone()
        .oneshot(request("GET", "/draft", None, None))
        .await
        .unwrap();
    assert_eq!(public.status(), StatusCode::NOT_FOUND);

    let admin = app
        .clone()
        .oneshot(request("GET", "/draft", None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::OK);

    let duplicate = app
        .clone()
        .oneshot(request("POST", "/", Some(new_post("draft", true)), Some(&token)))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let bad_slug = app
        .oneshot(request("POST", "/", Some(new_post("Bad Slug", true)), Some(&token)))
        .await
        .unwrap();
    assert_eq!(bad_slug.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_posts_served_from_file_copy_when_database_is_down() {
    let dir = TestDir::new("posts-handler-fallback");
    let token = admin_token();

    // populate the copy while the database is healthy
    let healthy = app(FallbackPostRepository::new(
        InMemoryPostRepository::new(),
        FilePostRepository::new(dir.path()),
    ));
    let response = healthy
        .oneshot(request("POST", "/", Some(new_post("kept-online", true)), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let degraded = app(FallbackPostRepository::new(
        UnreachableStore,
        FilePostRepository::new(dir.path()),
    ));

    let response = degraded
        .clone()
        .oneshot(request("GET", "/kept-online", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = degraded
        .clone()
        .oneshot(request("GET", "/", None, None))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body[0]["slug"], "kept-online");

    let response = degraded
        .oneshot(request("POST", "/", Some(new_post("while-down", true)), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "STORE_UNAVAILABLE");
    assert_eq!(body["retriable"], true);
}
