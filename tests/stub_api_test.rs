use api_smoke::stub::stub_router;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/auth/register",
            json!({
                "username": username,
                "email": format!("{username}@x.com"),
                "password": "P@ssw0rd1",
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_returns_token_envelope() {
    let app = stub_router();
    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "u1", "email": "u1@x.com", "password": "P@ssw0rd1"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["username"], json!("u1"));
}

#[tokio::test]
async fn test_register_rejects_invalid_payload() {
    let app = stub_router();

    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "u1", "email": "not-an-email", "password": "P@ssw0rd1"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "u2", "email": "u2@x.com", "password": "short"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let app = stub_router();
    register(&app, "dupe").await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"username": "dupe", "email": "dupe@x.com", "password": "P@ssw0rd1"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Username already exists"));
}

#[tokio::test]
async fn test_concurrent_duplicate_registrations_admit_one() {
    let app = stub_router();

    let mut handles = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let (status, _) = send(
                &app,
                post_json(
                    "/auth/register",
                    json!({
                        "username": "racer",
                        "email": format!("racer{i}@x.com"),
                        "password": "P@ssw0rd1",
                    }),
                    None,
                ),
            )
            .await;
            status
        }));
    }

    let mut created = 0;
    for handle in handles {
        let status = handle.await.unwrap();
        if status == StatusCode::CREATED {
            created += 1;
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_me_requires_bearer() {
    let app = stub_router();

    let (status, _) = send(&app, get("/auth/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/auth/me", Some("bogus"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register(&app, "me_user").await;
    let (status, body) = send(&app, get("/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], json!("me_user"));
}

#[tokio::test]
async fn test_health_is_open_and_ok() {
    let app = stub_router();
    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn test_create_server_echoes_name() {
    let app = stub_router();
    let token = register(&app, "server_owner").await;

    let (status, body) = send(
        &app,
        post_json("/servers", json!({"name": "Test"}), Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], json!("Test"));
    assert_eq!(body["data"]["owner"], json!("server_owner"));
}

#[tokio::test]
async fn test_create_community_requires_auth() {
    let app = stub_router();
    let (status, _) = send(
        &app,
        post_json("/communities", json!({"name": "Nope"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_returns_success_envelope() {
    let app = stub_router();
    let token = register(&app, "searcher").await;

    let (status, body) = send(&app, get("/search?q=smoke", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["query"], json!("smoke"));
}
